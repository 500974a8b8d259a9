//! Route definitions for staff moderation.
//!
//! ```text
//! POST /reviews/approve     -> approve_reviews (staff)
//! POST /reviews/reject      -> reject_reviews (staff)
//! GET  /reviews/{id}/pdf    -> review_pdf (staff)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reviews/approve", post(admin::approve_reviews))
        .route("/reviews/reject", post(admin::reject_reviews))
        .route("/reviews/{id}/pdf", get(admin::review_pdf))
}
