pub mod admin;
pub mod auth;
pub mod countries;
pub mod genres;
pub mod health;
pub mod movies;
pub mod people;
pub mod professions;
pub mod ratings;
pub mod reviews;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      register + login (anonymous only)
/// /auth/login                       login (anonymous only)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (requires auth)
///
/// /movies                           list, create (staff)
/// /movies/filter-options            facet values (cached 1h)
/// /movies/{id}                      get, update, delete (staff writes)
/// /movies/{id}/ratings              ratings of one movie
/// /movies/{id}/poster               upload, delete poster (staff)
///
/// /people                           list, create (staff)
/// /people/birthdays                 upcoming-birthday view
/// /people/filter-options            facet values (cached 1h)
/// /people/{id}                      get, update, delete (staff writes)
/// /people/{id}/photo                upload photo (staff)
/// /people/{id}/biography            upload biography file (staff)
///
/// /professions                      list, create (staff)
/// /professions/{id}                 get, update, delete (staff writes)
///
/// /genres                           list, create (staff)
/// /genres/{id}                      get, update, delete (staff writes)
///
/// /countries                        list, create (staff)
/// /countries/{id}                   get, update, delete (staff writes)
///
/// /ratings                          list, create (auth)
/// /ratings/filter-options           facet values (cached 1h)
/// /ratings/{id}                     get, update, delete (owner or staff)
///
/// /reviews                          list, create (auth)
/// /reviews/filter-options           facet values (cached 1h)
/// /reviews/{id}                     get, update, delete (owner or staff)
///
/// /users                            list with activity stats (staff)
/// /users/{id}                       get, update (owner or staff), delete (admin)
/// /users/{id}/password              change password (owner)
///
/// /admin/reviews/approve            bulk approve (staff)
/// /admin/reviews/reject             bulk reject (staff)
/// /admin/reviews/{id}/pdf           PDF export (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/movies", movies::router())
        .nest("/people", people::router())
        .nest("/professions", professions::router())
        .nest("/genres", genres::router())
        .nest("/countries", countries::router())
        .nest("/ratings", ratings::router())
        .nest("/reviews", reviews::router())
        .nest("/users", users::router())
        .nest("/admin", admin::router())
}
