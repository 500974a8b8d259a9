//! Rating entity model and DTOs.

use kinoteka_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub movie_id: DbId,
    pub user_id: DbId,
    /// 1-10, or NULL for a watch-only entry.
    pub rate: Option<i16>,
    pub is_watched: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a rating. The user comes from the auth context.
#[derive(Debug, Deserialize)]
pub struct CreateRating {
    pub movie_id: DbId,
    pub rate: Option<i16>,
    pub is_watched: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRating {
    pub rate: Option<i16>,
    pub is_watched: Option<bool>,
}

/// Query parameters for `GET /ratings`.
///
/// `rate` is a string so an unparseable value filters to an empty result
/// instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct RatingListParams {
    pub movie: Option<DbId>,
    pub user: Option<DbId>,
    pub rate: Option<String>,
    /// Sort key: `created_at`, `updated_at`; `-` prefix descends.
    pub sort: Option<String>,
}
