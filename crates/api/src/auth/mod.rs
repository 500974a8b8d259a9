//! Token and password primitives for the auth endpoints.

pub mod jwt;
pub mod password;
