//! Route definitions for the movie catalog.
//!
//! ```text
//! GET    /                  -> list_movies
//! POST   /                  -> create_movie (staff)
//! GET    /filter-options    -> filter_options (cached 1h)
//! GET    /{id}              -> get_movie
//! PUT    /{id}              -> update_movie (staff)
//! DELETE /{id}              -> delete_movie (staff)
//! GET    /{id}/ratings      -> movie_ratings
//! POST   /{id}/poster       -> upload_poster (staff)
//! DELETE /{id}/poster       -> delete_poster (staff)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route("/filter-options", get(movies::filter_options))
        .route(
            "/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/{id}/ratings", get(movies::movie_ratings))
        .route(
            "/{id}/poster",
            post(movies::upload_poster).delete(movies::delete_poster),
        )
}
