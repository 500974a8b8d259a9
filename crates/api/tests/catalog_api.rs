//! HTTP-level integration tests for the movie catalog endpoints:
//! permissions, duplicate detection, annotations, filtering, and dynamic
//! field selection.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user_with_token, delete_auth, get, get_auth, post_json, post_json_auth,
    put_json_auth,
};
use kinoteka_db::models::genre::CreateGenre;
use kinoteka_db::models::movie::CreateMovie;
use kinoteka_db::models::rating::CreateRating;
use kinoteka_db::repositories::{GenreRepo, MovieRepo, RatingRepo};
use sqlx::PgPool;

fn new_movie(title: &str, release_date: Option<&str>) -> CreateMovie {
    CreateMovie {
        kind: None,
        title: title.to_string(),
        release_date: release_date.map(|d| d.parse().expect("valid date")),
        description: None,
        trailer_url: None,
        genre_ids: Vec::new(),
        country_ids: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

/// Anonymous movie creation returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_movie_anonymous(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "title": "Alien" });
    let response = post_json(app, "/api/v1/movies", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A regular user cannot create movies; a moderator can.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_movie_requires_staff(pool: PgPool) {
    let (_u, user_token) = create_user_with_token(&pool, "plainuser", "user").await;
    let (_m, mod_token) = create_user_with_token(&pool, "moduser", "moderator").await;

    let body = serde_json::json!({ "title": "Alien", "release_date": "1979-05-25" });

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/movies", &user_token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/movies", &mod_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Alien");
    assert_eq!(json["data"]["kind"], "movie");
}

/// Recreating the same (title, release date) pair returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_movie_duplicate_title_and_date(pool: PgPool) {
    let (_m, mod_token) = create_user_with_token(&pool, "moddup", "moderator").await;
    MovieRepo::create(&pool, &new_movie("Alien", Some("1979-05-25")))
        .await
        .expect("movie creation should succeed");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "title": "Alien", "release_date": "1979-05-25" });
    let response = post_json_auth(app, "/api/v1/movies", &mod_token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The same title with a different release date is a different movie.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_movie_same_title_other_date(pool: PgPool) {
    let (_m, mod_token) = create_user_with_token(&pool, "modremake", "moderator").await;
    MovieRepo::create(&pool, &new_movie("Nosferatu", Some("1922-03-04")))
        .await
        .expect("movie creation should succeed");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "title": "Nosferatu", "release_date": "2024-12-25" });
    let response = post_json_auth(app, "/api/v1/movies", &mod_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Deleting a genre still linked to a movie returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_linked_genre_conflicts(pool: PgPool) {
    let (_m, mod_token) = create_user_with_token(&pool, "modgenre", "moderator").await;
    let genre = GenreRepo::create(&pool, &CreateGenre { name: "horror".into() })
        .await
        .expect("genre creation should succeed");
    let mut input = new_movie("Alien", Some("1979-05-25"));
    input.genre_ids = vec![genre.id];
    MovieRepo::create(&pool, &input)
        .await
        .expect("movie creation should succeed");

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/genres/{}", genre.id), &mod_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Listing, annotations, filtering
// ---------------------------------------------------------------------------

/// The listing carries the average rating; unrated movies average to 0
/// and the default order is best-rated first.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_movies_rate_annotation(pool: PgPool) {
    let (rater, _t) = create_user_with_token(&pool, "rater", "user").await;
    let good = MovieRepo::create(&pool, &new_movie("Good One", Some("2001-01-01")))
        .await
        .expect("movie creation should succeed");
    let _unrated = MovieRepo::create(&pool, &new_movie("Unseen", Some("2002-01-01")))
        .await
        .expect("movie creation should succeed");

    RatingRepo::create(
        &pool,
        rater.id,
        &CreateRating {
            movie_id: good.id,
            rate: Some(8),
            is_watched: None,
        },
    )
    .await
    .expect("rating creation should succeed");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/movies").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let items = json["data"].as_array().expect("data must be an array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "Good One");
    assert_eq!(items[0]["rate"], 8.0);
    assert_eq!(items[1]["title"], "Unseen");
    assert_eq!(items[1]["rate"], 0.0);
}

/// An unparseable `year` filter yields an empty result, not an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_movies_invalid_year_is_empty(pool: PgPool) {
    MovieRepo::create(&pool, &new_movie("Alien", Some("1979-05-25")))
        .await
        .expect("movie creation should succeed");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/movies?year=not-a-year").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().expect("array").len(), 0);
}

/// Substring title search is case-insensitive.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_movies_search(pool: PgPool) {
    MovieRepo::create(&pool, &new_movie("Blade Runner", Some("1982-06-25")))
        .await
        .expect("movie creation should succeed");
    MovieRepo::create(&pool, &new_movie("Alien", Some("1979-05-25")))
        .await
        .expect("movie creation should succeed");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/movies?search=blade").await;
    let json = body_json(response).await;
    let items = json["data"].as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Blade Runner");
}

/// `?sort=title` ascends, `?sort=-title` descends.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_movies_sort_direction(pool: PgPool) {
    MovieRepo::create(&pool, &new_movie("Brazil", Some("1985-02-20")))
        .await
        .expect("movie creation should succeed");
    MovieRepo::create(&pool, &new_movie("Akira", Some("1988-07-16")))
        .await
        .expect("movie creation should succeed");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/movies?sort=title").await).await;
    assert_eq!(json["data"][0]["title"], "Akira");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/movies?sort=-title").await).await;
    assert_eq!(json["data"][0]["title"], "Brazil");
}

// ---------------------------------------------------------------------------
// Detail payload and field selection
// ---------------------------------------------------------------------------

/// The detail payload embeds associations; an authenticated caller sees
/// their own rating as `my_rating`.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_movie_detail_embeds(pool: PgPool) {
    let (viewer, token) = create_user_with_token(&pool, "viewer", "user").await;
    let movie = MovieRepo::create(&pool, &new_movie("Alien", Some("1979-05-25")))
        .await
        .expect("movie creation should succeed");
    RatingRepo::create(
        &pool,
        viewer.id,
        &CreateRating {
            movie_id: movie.id,
            rate: Some(9),
            is_watched: None,
        },
    )
    .await
    .expect("rating creation should succeed");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/movies/{}", movie.id)).await).await;
    assert_eq!(json["data"]["rates_count"], 1);
    assert!(json["data"]["genres"].is_array());
    assert!(json["data"]["actors"].is_array());
    assert!(json["data"]["my_rating"].is_null(), "anonymous caller has no rating");

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, &format!("/api/v1/movies/{}", movie.id), &token).await).await;
    assert_eq!(json["data"]["my_rating"]["rate"], 9);
}

/// `include_fields` restricts the payload; `exclude_fields` wins afterwards.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_field_selection(pool: PgPool) {
    MovieRepo::create(&pool, &new_movie("Alien", Some("1979-05-25")))
        .await
        .expect("movie creation should succeed");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/movies?include_fields=id,title").await).await;
    let item = &json["data"][0];
    assert!(item["id"].is_number());
    assert!(item["title"].is_string());
    assert!(item.get("kind").is_none(), "kind must be pruned");

    let app = common::build_test_app(pool);
    let json =
        body_json(get(app, "/api/v1/movies?include_fields=id,title&exclude_fields=title").await)
            .await;
    let item = &json["data"][0];
    assert!(item["id"].is_number());
    assert!(item.get("title").is_none(), "exclusion applies after inclusion");
}

// ---------------------------------------------------------------------------
// Filter options
// ---------------------------------------------------------------------------

/// Facet payload lists kinds, years, and genre names; the cached copy is
/// served even after the tables change.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_movie_filter_options_cached(pool: PgPool) {
    MovieRepo::create(&pool, &new_movie("Alien", Some("1979-05-25")))
        .await
        .expect("movie creation should succeed");
    GenreRepo::create(&pool, &CreateGenre { name: "horror".into() })
        .await
        .expect("genre creation should succeed");

    // Same app instance both times so the cache is shared.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app.clone(), "/api/v1/movies/filter-options").await).await;
    assert_eq!(json["data"]["kinds"], serde_json::json!(["movie", "series"]));
    assert_eq!(json["data"]["years"], serde_json::json!([1979]));
    assert_eq!(json["data"]["genres"], serde_json::json!(["horror"]));

    MovieRepo::create(&pool, &new_movie("Akira", Some("1988-07-16")))
        .await
        .expect("movie creation should succeed");

    let json = body_json(get(app, "/api/v1/movies/filter-options").await).await;
    assert_eq!(
        json["data"]["years"],
        serde_json::json!([1979]),
        "cached facet payload must not refresh within the TTL"
    );
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Partial update leaves omitted fields untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_movie_partial(pool: PgPool) {
    let (_m, mod_token) = create_user_with_token(&pool, "modedit", "moderator").await;
    let movie = MovieRepo::create(&pool, &new_movie("Alien", Some("1979-05-25")))
        .await
        .expect("movie creation should succeed");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "description": "In space no one can hear you scream." });
    let response = put_json_auth(app, &format!("/api/v1/movies/{}", movie.id), &mod_token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Alien");
    assert_eq!(
        json["data"]["description"],
        "In space no one can hear you scream."
    );
}
