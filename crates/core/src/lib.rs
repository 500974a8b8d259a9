//! Framework-free domain logic for the movie catalog.
//!
//! Everything in this crate is pure: no database handles, no HTTP types.
//! The `db` and `api` crates build on these primitives.

pub mod birthday;
pub mod choices;
pub mod error;
pub mod fields;
pub mod http;
pub mod roles;
pub mod types;
