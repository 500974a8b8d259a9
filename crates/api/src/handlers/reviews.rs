//! Handlers for the `/reviews` resource.
//!
//! Reviews are moderated: every new review starts at `in_progress` and
//! only staff transition the status. Content edits are allowed for the
//! author and for staff.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kinoteka_core::choices::{REVIEW_KINDS, REVIEW_STATUSES, REVIEW_TEXT_MAX_CHARS};
use kinoteka_core::error::CoreError;
use kinoteka_core::types::DbId;
use kinoteka_db::models::review::{CreateReview, Review, ReviewListParams, UpdateReview};
use kinoteka_db::repositories::ReviewRepo;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::FieldParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_kind(kind: &str) -> AppResult<()> {
    if !REVIEW_KINDS.contains(&kind) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown review kind: {kind}"
        ))));
    }
    Ok(())
}

fn validate_text(text: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Review text must not be empty".into(),
        )));
    }
    if text.chars().count() > REVIEW_TEXT_MAX_CHARS {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Review text must not exceed {REVIEW_TEXT_MAX_CHARS} characters"
        ))));
    }
    Ok(())
}

/// GET /api/v1/reviews
///
/// Public listing with movie titles and author names resolved, newest
/// first by default.
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let reviews = ReviewRepo::list(&state.pool, &params).await?;
    let payload = serde_json::to_value(reviews)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// GET /api/v1/reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Review>>> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Review", id }))?;
    Ok(Json(DataResponse { data: review }))
}

/// POST /api/v1/reviews
///
/// Authenticated users review on their own behalf; the status always
/// starts at `in_progress`.
pub async fn create_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    validate_kind(&input.kind)?;
    validate_text(&input.text)?;
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }

    let review = ReviewRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// PUT /api/v1/reviews/{id}
///
/// Owner or staff for content fields; the `status` field is honored only
/// for staff and silently ignored otherwise.
pub async fn update_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReview>,
) -> AppResult<Json<DataResponse<Review>>> {
    if let Some(kind) = &input.kind {
        validate_kind(kind)?;
    }
    if let Some(text) = &input.text {
        validate_text(text)?;
    }
    if let Some(status) = &input.status {
        if auth_user.is_staff() && !REVIEW_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown review status: {status}"
            ))));
        }
    }

    let existing = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Review", id }))?;
    if !auth_user.can_act_on(existing.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only edit your own review".into(),
        )));
    }

    let review = ReviewRepo::update(&state.pool, id, &input, auth_user.is_staff())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Review", id }))?;
    Ok(Json(DataResponse { data: review }))
}

/// DELETE /api/v1/reviews/{id}
///
/// Owner or staff.
pub async fn delete_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Review", id }))?;
    if !auth_user.can_act_on(existing.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only delete your own review".into(),
        )));
    }

    ReviewRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/reviews/filter-options
///
/// Facet values for the review filter panel. Cached for an hour.
pub async fn filter_options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Value>>> {
    if let Some(cached) = state.filter_cache.reviews.get().await {
        return Ok(Json(DataResponse { data: cached }));
    }
    let payload = json!({
        "kinds": REVIEW_KINDS,
        "statuses": REVIEW_STATUSES,
        "sort_options": [
            { "label": "Newest first", "filter": "-created_at" },
            { "label": "Oldest first", "filter": "created_at" },
            { "label": "Recently updated", "filter": "-updated_at" },
        ],
    });
    state.filter_cache.reviews.put(payload.clone()).await;
    Ok(Json(DataResponse { data: payload }))
}
