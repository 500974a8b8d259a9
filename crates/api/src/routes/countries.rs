//! Route definitions for countries.
//!
//! ```text
//! GET    /       -> list_countries
//! POST   /       -> create_country (staff)
//! GET    /{id}   -> get_country
//! PUT    /{id}   -> update_country (staff)
//! DELETE /{id}   -> delete_country (staff)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::countries;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(countries::list_countries).post(countries::create_country),
        )
        .route(
            "/{id}",
            get(countries::get_country)
                .put(countries::update_country)
                .delete(countries::delete_country),
        )
}
