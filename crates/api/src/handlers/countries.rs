//! Handlers for the `/countries` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kinoteka_core::error::CoreError;
use kinoteka_core::types::DbId;
use kinoteka_db::models::country::{Country, CountryListParams, CreateCountry};
use kinoteka_db::repositories::CountryRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::FieldParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/countries
pub async fn list_countries(
    State(state): State<AppState>,
    Query(params): Query<CountryListParams>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let countries = CountryRepo::list(&state.pool, &params).await?;
    let payload = serde_json::to_value(countries)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// GET /api/v1/countries/{id}
pub async fn get_country(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Country>>> {
    let country = CountryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Country", id }))?;
    Ok(Json(DataResponse { data: country }))
}

/// POST /api/v1/countries
///
/// Staff-only. Duplicate names hit the unique constraint and map to 409.
pub async fn create_country(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Json(input): Json<CreateCountry>,
) -> AppResult<(StatusCode, Json<DataResponse<Country>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    let country = CountryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: country })))
}

/// PUT /api/v1/countries/{id}
///
/// Staff-only rename.
pub async fn update_country(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<CreateCountry>,
) -> AppResult<Json<DataResponse<Country>>> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name must not be empty".into(),
        )));
    }
    let country = CountryRepo::update(&state.pool, id, &input.name)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Country", id }))?;
    Ok(Json(DataResponse { data: country }))
}

/// DELETE /api/v1/countries/{id}
///
/// Staff-only. Fails with 409 while movies reference the country
/// (restrict-on-delete).
pub async fn delete_country(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CountryRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Country", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
