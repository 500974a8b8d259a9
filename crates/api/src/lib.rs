//! Movie-catalog API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes)
//! so integration tests and the binary entrypoint share the exact same
//! middleware stack and router.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod pdf;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
