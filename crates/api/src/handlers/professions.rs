//! Handlers for the `/professions` resource (movie <-> person credits).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kinoteka_core::choices::PROFESSIONS;
use kinoteka_core::error::CoreError;
use kinoteka_core::types::DbId;
use kinoteka_db::models::profession::{
    CreateProfession, Profession, ProfessionListParams, UpdateProfession,
};
use kinoteka_db::repositories::ProfessionRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::FieldParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_name(name: &str) -> AppResult<()> {
    if !PROFESSIONS.contains(&name) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown profession: {name}"
        ))));
    }
    Ok(())
}

/// GET /api/v1/professions
///
/// Public listing with movie titles and person names resolved.
pub async fn list_professions(
    State(state): State<AppState>,
    Query(params): Query<ProfessionListParams>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let credits = ProfessionRepo::list(&state.pool, &params).await?;
    let payload = serde_json::to_value(credits)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// GET /api/v1/professions/{id}
pub async fn get_profession(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Profession>>> {
    let credit = ProfessionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Profession", id }))?;
    Ok(Json(DataResponse { data: credit }))
}

/// POST /api/v1/professions
///
/// Staff-only. Defaults to `actor` when no name is given; a duplicate
/// (name, movie, person) triple maps to 409 via the unique constraint.
pub async fn create_profession(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Json(input): Json<CreateProfession>,
) -> AppResult<(StatusCode, Json<DataResponse<Profession>>)> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    let credit = ProfessionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: credit })))
}

/// PUT /api/v1/professions/{id}
///
/// Staff-only partial update.
pub async fn update_profession(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProfession>,
) -> AppResult<Json<DataResponse<Profession>>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    let credit = ProfessionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Profession", id }))?;
    Ok(Json(DataResponse { data: credit }))
}

/// DELETE /api/v1/professions/{id}
///
/// Staff-only.
pub async fn delete_profession(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProfessionRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Profession", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
