//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A `Deserialize` list-params struct for filtering and sorting

pub mod country;
pub mod genre;
pub mod movie;
pub mod person;
pub mod profession;
pub mod rating;
pub mod review;
pub mod session;
pub mod user;
