//! Route definitions for people.
//!
//! ```text
//! GET    /                  -> list_people
//! POST   /                  -> create_person (staff)
//! GET    /birthdays         -> upcoming_birthdays
//! GET    /filter-options    -> filter_options (cached 1h)
//! GET    /{id}              -> get_person
//! PUT    /{id}              -> update_person (staff)
//! DELETE /{id}              -> delete_person (staff)
//! POST   /{id}/photo        -> upload_photo (staff)
//! POST   /{id}/biography    -> upload_biography (staff)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::people;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(people::list_people).post(people::create_person))
        .route("/birthdays", get(people::upcoming_birthdays))
        .route("/filter-options", get(people::filter_options))
        .route(
            "/{id}",
            get(people::get_person)
                .put(people::update_person)
                .delete(people::delete_person),
        )
        .route("/{id}/photo", post(people::upload_photo))
        .route("/{id}/biography", post(people::upload_biography))
}
