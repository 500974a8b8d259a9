//! Profession entity (movie <-> person credit) model and DTOs.

use kinoteka_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profession {
    pub id: DbId,
    pub name: String,
    pub movie_id: DbId,
    pub person_id: DbId,
}

/// Listing row with the joined display names resolved in the same query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfessionWithNames {
    pub id: DbId,
    pub name: String,
    pub movie_id: DbId,
    pub movie_title: String,
    pub person_id: DbId,
    pub person_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProfession {
    pub name: Option<String>,
    pub movie_id: DbId,
    pub person_id: DbId,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfession {
    pub name: Option<String>,
    pub movie_id: Option<DbId>,
    pub person_id: Option<DbId>,
}

/// Query parameters for `GET /professions`.
#[derive(Debug, Default, Deserialize)]
pub struct ProfessionListParams {
    /// `actor` or `director`.
    pub name: Option<String>,
    pub movie: Option<DbId>,
    pub person: Option<DbId>,
}
