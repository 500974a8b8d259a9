//! Movie entity model and DTOs.

use chrono::NaiveDate;
use kinoteka_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Plain movie row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub poster_path: Option<String>,
    pub trailer_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Annotated listing row: movie plus the average of its non-null rating
/// values (0 when unrated) and the release year split out for clients.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieWithRate {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub release_year: Option<i32>,
    pub description: Option<String>,
    pub poster_path: Option<String>,
    pub trailer_url: Option<String>,
    pub rate: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a movie.
#[derive(Debug, Deserialize)]
pub struct CreateMovie {
    pub kind: Option<String>,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<DbId>,
    #[serde(default)]
    pub country_ids: Vec<DbId>,
}

/// DTO for updating a movie. All fields are optional; `genre_ids` and
/// `country_ids`, when present, replace the full association set.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMovie {
    pub kind: Option<String>,
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub trailer_url: Option<String>,
    pub genre_ids: Option<Vec<DbId>>,
    pub country_ids: Option<Vec<DbId>>,
}

/// Query parameters for `GET /movies`.
///
/// `year` is a string so an unparseable value filters to an empty result
/// instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct MovieListParams {
    /// Case-insensitive substring match on title.
    pub search: Option<String>,
    pub kind: Option<String>,
    pub year: Option<String>,
    /// Genre name.
    pub genre: Option<String>,
    /// Country name.
    pub country: Option<String>,
    /// Sort key: `rate`, `release_date`, `title`; `-` prefix descends.
    pub sort: Option<String>,
}
