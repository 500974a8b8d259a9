//! User entity model and DTOs.

use kinoteka_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`UserResponse`] or [`UserWithStats`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Annotated listing row: user plus aggregate activity counts, computed
/// in a single query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserWithStats {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    /// Ratings marked as watched.
    pub watches: i64,
    /// Ratings carrying a non-null rate value.
    pub rates: i64,
    pub reviews: i64,
    pub created_at: Timestamp,
}

/// DTO for creating a new user (password already hashed by the caller).
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Only honored for staff callers; silently ignored otherwise.
    pub role: Option<String>,
}

/// Query parameters for `GET /users`.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    /// Case-insensitive substring match on username.
    pub search: Option<String>,
    pub role: Option<String>,
    /// Sort key, `-` prefix for descending (e.g. `-watches`).
    pub sort: Option<String>,
}
