//! Route definitions for profession credits.
//!
//! ```text
//! GET    /       -> list_professions
//! POST   /       -> create_profession (staff)
//! GET    /{id}   -> get_profession
//! PUT    /{id}   -> update_profession (staff)
//! DELETE /{id}   -> delete_profession (staff)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::professions;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(professions::list_professions).post(professions::create_profession),
        )
        .route(
            "/{id}",
            get(professions::get_profession)
                .put(professions::update_profession)
                .delete(professions::delete_profession),
        )
}
