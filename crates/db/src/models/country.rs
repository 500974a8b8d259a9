//! Country lookup entity.

use kinoteka_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Country {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCountry {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CountryListParams {
    /// Case-insensitive substring match on name.
    pub search: Option<String>,
    /// Sort key: `name`; `-` prefix descends.
    pub sort: Option<String>,
}
