//! Route definitions for ratings.
//!
//! ```text
//! GET    /                  -> list_ratings
//! POST   /                  -> create_rating (auth)
//! GET    /filter-options    -> filter_options (cached 1h)
//! GET    /{id}              -> get_rating
//! PUT    /{id}              -> update_rating (owner or staff)
//! DELETE /{id}              -> delete_rating (owner or staff)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::ratings;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ratings::list_ratings).post(ratings::create_rating))
        .route("/filter-options", get(ratings::filter_options))
        .route(
            "/{id}",
            get(ratings::get_rating)
                .put(ratings::update_rating)
                .delete(ratings::delete_rating),
        )
}
