//! Handlers for the `/users` resource.
//!
//! Listing is staff-only and carries activity aggregates (watches, rates,
//! reviews) computed in a single query. Individual records are visible to
//! their owner and to staff.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kinoteka_core::error::CoreError;
use kinoteka_core::roles::{ALL_ROLES, ROLE_ADMIN};
use kinoteka_core::types::DbId;
use kinoteka_db::models::user::{UpdateUser, UserListParams, UserResponse};
use kinoteka_db::repositories::UserRepo;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::FieldParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /users/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password1: String,
    pub password2: String,
}

/// GET /api/v1/users
///
/// Staff-only annotated listing with per-user activity counts.
pub async fn list_users(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Query(params): Query<UserListParams>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let users = UserRepo::list_annotated(&state.pool, &params).await?;
    let payload = serde_json::to_value(users)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// GET /api/v1/users/{id}
///
/// Visible to the account owner and to staff.
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    if !auth_user.can_act_on(id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only view your own account".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let payload = serde_json::to_value(UserResponse::from(user))
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// PUT /api/v1/users/{id}
///
/// The owner may change their own username and email; only an admin may
/// change roles (for any account).
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if !auth_user.can_act_on(id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only edit your own account".into(),
        )));
    }

    if let Some(role) = &input.role {
        if auth_user.role != ROLE_ADMIN {
            // Non-admin callers cannot escalate; drop the field silently.
            input.role = None;
        } else if !ALL_ROLES.contains(&role.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role: {role}"
            ))));
        }
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PUT /api/v1/users/{id}/password
///
/// Owner-only password change; both entered values must match and meet
/// the strength requirement. All sessions stay valid.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    if auth_user.user_id != id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only change your own password".into(),
        )));
    }
    if input.password1 != input.password2 {
        return Err(AppError::Core(CoreError::Validation(
            "Passwords do not match".into(),
        )));
    }
    validate_password_strength(&input.password1)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/{id}
///
/// Admin-only. Fails with 409 while the user still owns ratings or
/// reviews (restrict-on-delete).
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
