//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20260301000001_create_users.sql`.

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MODERATOR: &str = "moderator";

/// Every valid role, in seed order.
pub const ALL_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN, ROLE_MODERATOR];

/// Staff roles may manage catalog entries and moderate reviews.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MODERATOR
}
