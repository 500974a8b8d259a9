//! Route definitions for reviews.
//!
//! ```text
//! GET    /                  -> list_reviews
//! POST   /                  -> create_review (auth)
//! GET    /filter-options    -> filter_options (cached 1h)
//! GET    /{id}              -> get_review
//! PUT    /{id}              -> update_review (owner or staff)
//! DELETE /{id}              -> delete_review (owner or staff)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_reviews).post(reviews::create_review))
        .route("/filter-options", get(reviews::filter_options))
        .route(
            "/{id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
}
