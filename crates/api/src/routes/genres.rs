//! Route definitions for genres.
//!
//! ```text
//! GET    /       -> list_genres
//! POST   /       -> create_genre (staff)
//! GET    /{id}   -> get_genre
//! PUT    /{id}   -> update_genre (staff)
//! DELETE /{id}   -> delete_genre (staff)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::genres;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(genres::list_genres).post(genres::create_genre))
        .route(
            "/{id}",
            get(genres::get_genre)
                .put(genres::update_genre)
                .delete(genres::delete_genre),
        )
}
