//! Handlers for the `/ratings` resource.
//!
//! A rating belongs to its author; updates and deletes are allowed for
//! the owner and for staff. A NULL rate with `is_watched` marks a movie
//! as watched without scoring it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kinoteka_core::choices::RATING_VALUES;
use kinoteka_core::error::CoreError;
use kinoteka_core::types::DbId;
use kinoteka_db::models::rating::{CreateRating, Rating, RatingListParams, UpdateRating};
use kinoteka_db::repositories::RatingRepo;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::FieldParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_rate(rate: i16) -> AppResult<()> {
    if !RATING_VALUES.contains(&rate) {
        return Err(AppError::Core(CoreError::Validation(
            "Rate must be between 1 and 10".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/ratings
///
/// Public listing, newest first by default.
pub async fn list_ratings(
    State(state): State<AppState>,
    Query(params): Query<RatingListParams>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let ratings = RatingRepo::list(&state.pool, &params).await?;
    let payload = serde_json::to_value(ratings)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// GET /api/v1/ratings/{id}
pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Rating>>> {
    let rating = RatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Rating", id }))?;
    Ok(Json(DataResponse { data: rating }))
}

/// POST /api/v1/ratings
///
/// Authenticated users rate (or mark watched) on their own behalf; the
/// author is always the caller.
pub async fn create_rating(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateRating>,
) -> AppResult<(StatusCode, Json<DataResponse<Rating>>)> {
    if let Some(rate) = input.rate {
        validate_rate(rate)?;
    }
    let rating = RatingRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: rating })))
}

/// PUT /api/v1/ratings/{id}
///
/// Owner or staff.
pub async fn update_rating(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRating>,
) -> AppResult<Json<DataResponse<Rating>>> {
    if let Some(rate) = input.rate {
        validate_rate(rate)?;
    }
    let existing = RatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Rating", id }))?;
    if !auth_user.can_act_on(existing.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only edit your own rating".into(),
        )));
    }

    let rating = RatingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Rating", id }))?;
    Ok(Json(DataResponse { data: rating }))
}

/// DELETE /api/v1/ratings/{id}
///
/// Owner or staff.
pub async fn delete_rating(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = RatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Rating", id }))?;
    if !auth_user.can_act_on(existing.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only delete your own rating".into(),
        )));
    }

    RatingRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/ratings/filter-options
///
/// Facet values for the rating filter panel. Cached for an hour.
pub async fn filter_options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Value>>> {
    if let Some(cached) = state.filter_cache.ratings.get().await {
        return Ok(Json(DataResponse { data: cached }));
    }
    let payload = json!({
        "rates": RATING_VALUES,
        "sort_options": [
            { "label": "Newest first", "filter": "-created_at" },
            { "label": "Oldest first", "filter": "created_at" },
            { "label": "Recently updated", "filter": "-updated_at" },
        ],
    });
    state.filter_cache.ratings.put(payload.clone()).await;
    Ok(Json(DataResponse { data: payload }))
}
