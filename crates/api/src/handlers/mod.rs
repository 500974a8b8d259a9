//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod countries;
pub mod genres;
pub mod movies;
pub mod people;
pub mod professions;
pub mod ratings;
pub mod reviews;
pub mod users;
