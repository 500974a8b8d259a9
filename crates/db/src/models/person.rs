//! Person entity model and DTOs.

use chrono::NaiveDate;
use kinoteka_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<String>,
    pub biography_path: Option<String>,
    pub photo_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Annotated birthday-listing row. Only people with a known birth date
/// appear in this view.
#[derive(Debug, Clone, Serialize)]
pub struct PersonWithBirthday {
    pub id: DbId,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub sex: Option<String>,
    pub photo_path: Option<String>,
    /// 0 when the birthday is today.
    pub days_to_birthday: i64,
}

/// Minimal person reference embedded in movie detail payloads
/// (actor/director lists).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonRef {
    pub id: DbId,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePerson {
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePerson {
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<String>,
}

/// Query parameters for `GET /people`.
#[derive(Debug, Default, Deserialize)]
pub struct PersonListParams {
    /// Case-insensitive substring match on full name.
    pub search: Option<String>,
    pub sex: Option<String>,
    /// Sort key: `full_name`, `birth_date`; `-` prefix descends.
    pub sort: Option<String>,
}
