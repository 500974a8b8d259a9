//! Review entity model and DTOs.

use kinoteka_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub text: String,
    /// Moderation status; starts at `in_progress`, only staff transition it.
    pub status: String,
    pub movie_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row with author and movie display names resolved in the same
/// query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithNames {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub text: String,
    pub status: String,
    pub movie_id: DbId,
    pub movie_title: String,
    pub user_id: DbId,
    pub username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a review. The author comes from the auth context and
/// the status always starts at `in_progress`.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub kind: String,
    pub title: String,
    pub text: String,
    pub movie_id: DbId,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateReview {
    pub kind: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    /// Only honored for staff callers; silently ignored otherwise.
    pub status: Option<String>,
}

/// Query parameters for `GET /reviews`.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewListParams {
    pub movie: Option<DbId>,
    pub user: Option<DbId>,
    pub kind: Option<String>,
    /// Sort key: `created_at`, `updated_at`; `-` prefix descends.
    pub sort: Option<String>,
}
