//! Handlers for the `/people` resource.
//!
//! Besides plain CRUD, people get a birthday view (`/people/birthdays`)
//! listing everyone with a known birth date ordered by days until their
//! next birthday, and staff-only uploads for photos and biography files.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kinoteka_core::choices::SEXES;
use kinoteka_core::error::CoreError;
use kinoteka_core::types::DbId;
use kinoteka_db::models::person::{
    CreatePerson, Person, PersonListParams, PersonWithBirthday, UpdatePerson,
};
use kinoteka_db::repositories::PersonRepo;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::media::{BIOGRAPHIES_DIR, PHOTOS_DIR};
use crate::middleware::rbac::RequireStaff;
use crate::query::FieldParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/people
///
/// Public listing, youngest first by default.
pub async fn list_people(
    State(state): State<AppState>,
    Query(params): Query<PersonListParams>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let people = PersonRepo::list(&state.pool, &params).await?;
    let payload = serde_json::to_value(people)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// GET /api/v1/people/birthdays
///
/// Everyone with a known birth date, soonest birthday first. A person
/// whose birthday is today shows `days_to_birthday: 0`.
pub async fn upcoming_birthdays(
    State(state): State<AppState>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let people: Vec<PersonWithBirthday> = PersonRepo::list_by_upcoming_birthday(&state.pool).await?;
    let payload = serde_json::to_value(people)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// GET /api/v1/people/{id}
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let person = PersonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Person", id }))?;
    let payload = serde_json::to_value(person)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// POST /api/v1/people
///
/// Staff-only.
pub async fn create_person(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Json(input): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<DataResponse<Person>>)> {
    if input.full_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Full name must not be empty".into(),
        )));
    }
    let person = PersonRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: person })))
}

/// PUT /api/v1/people/{id}
///
/// Staff-only partial update.
pub async fn update_person(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePerson>,
) -> AppResult<Json<DataResponse<Person>>> {
    let person = PersonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Person", id }))?;
    Ok(Json(DataResponse { data: person }))
}

/// DELETE /api/v1/people/{id}
///
/// Staff-only. Fails with 409 while credits still reference the person
/// (restrict-on-delete). Stored photo and biography files are removed
/// with the row.
pub async fn delete_person(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let person = PersonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Person", id }))?;

    let deleted = PersonRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Person", id }));
    }
    if let Some(photo_path) = &person.photo_path {
        state.media.delete(photo_path).await?;
    }
    if let Some(biography_path) = &person.biography_path {
        state.media.delete(biography_path).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/people/{id}/photo
///
/// Staff-only multipart upload (`file` field). Replaces any previous
/// photo; the old file is removed after the row is committed.
pub async fn upload_photo(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Person>>> {
    upload_file(state, id, multipart, PHOTOS_DIR).await
}

/// POST /api/v1/people/{id}/biography
///
/// Staff-only multipart upload (`file` field) of a biography text file.
pub async fn upload_biography(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Person>>> {
    upload_file(state, id, multipart, BIOGRAPHIES_DIR).await
}

/// GET /api/v1/people/filter-options
///
/// Facet values for the person filter panel. Cached for an hour.
pub async fn filter_options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Value>>> {
    if let Some(cached) = state.filter_cache.people.get().await {
        return Ok(Json(DataResponse { data: cached }));
    }
    let payload = json!({
        "sexes": SEXES,
        "sort_options": [
            { "label": "Name A-Z", "filter": "full_name" },
            { "label": "Name Z-A", "filter": "-full_name" },
            { "label": "Youngest first", "filter": "-birth_date" },
            { "label": "Oldest first", "filter": "birth_date" },
        ],
    });
    state.filter_cache.people.put(payload.clone()).await;
    Ok(Json(DataResponse { data: payload }))
}

/// Shared multipart flow for the photo and biography uploads.
async fn upload_file(
    state: AppState,
    id: DbId,
    mut multipart: Multipart,
    subdir: &'static str,
) -> AppResult<Json<DataResponse<Person>>> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((filename, data.to_vec()));
        }
        // ignore unknown fields
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let stored = state.media.save(subdir, &filename, &data).await?;

    let replaced = match subdir {
        PHOTOS_DIR => PersonRepo::replace_photo(&state.pool, id, Some(&stored)).await?,
        _ => PersonRepo::replace_biography(&state.pool, id, Some(&stored)).await?,
    };
    let old = match replaced {
        Some(old) => old,
        None => {
            state.media.delete(&stored).await?;
            return Err(AppError::Core(CoreError::NotFound { entity: "Person", id }));
        }
    };
    if let Some(old_path) = old {
        state.media.delete(&old_path).await?;
    }

    let person = PersonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Person", id }))?;
    Ok(Json(DataResponse { data: person }))
}
