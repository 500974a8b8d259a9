//! Route definitions for user accounts.
//!
//! ```text
//! GET    /                  -> list_users (staff)
//! GET    /{id}              -> get_user (owner or staff)
//! PUT    /{id}              -> update_user (owner or staff)
//! DELETE /{id}              -> delete_user (admin)
//! PUT    /{id}/password     -> change_password (owner)
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/{id}/password", put(users::change_password))
}
