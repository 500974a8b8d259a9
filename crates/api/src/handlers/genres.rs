//! Handlers for the `/genres` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kinoteka_core::error::CoreError;
use kinoteka_core::types::DbId;
use kinoteka_db::models::genre::{CreateGenre, Genre, GenreListParams};
use kinoteka_db::repositories::GenreRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::FieldParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/genres
pub async fn list_genres(
    State(state): State<AppState>,
    Query(params): Query<GenreListParams>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let genres = GenreRepo::list(&state.pool, &params).await?;
    let payload = serde_json::to_value(genres)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// GET /api/v1/genres/{id}
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Genre>>> {
    let genre = GenreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Genre", id }))?;
    Ok(Json(DataResponse { data: genre }))
}

/// POST /api/v1/genres
///
/// Staff-only. Duplicate names hit the unique constraint and map to 409.
pub async fn create_genre(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Json(input): Json<CreateGenre>,
) -> AppResult<(StatusCode, Json<DataResponse<Genre>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    let genre = GenreRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: genre })))
}

/// PUT /api/v1/genres/{id}
///
/// Staff-only rename.
pub async fn update_genre(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<CreateGenre>,
) -> AppResult<Json<DataResponse<Genre>>> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    let genre = GenreRepo::update(&state.pool, id, &input.name)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Genre", id }))?;
    Ok(Json(DataResponse { data: genre }))
}

/// DELETE /api/v1/genres/{id}
///
/// Staff-only. Fails with 409 while movies reference the genre
/// (restrict-on-delete).
pub async fn delete_genre(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = GenreRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Genre", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
