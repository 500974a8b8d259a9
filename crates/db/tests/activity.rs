//! Integration tests for user activity: ratings, reviews, the aggregated
//! user statistics, and refresh-token sessions.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use kinoteka_db::models::movie::CreateMovie;
use kinoteka_db::models::rating::{CreateRating, RatingListParams, UpdateRating};
use kinoteka_db::models::review::{CreateReview, ReviewListParams, UpdateReview};
use kinoteka_db::models::session::CreateSession;
use kinoteka_db::models::user::{CreateUser, User, UserListParams};
use kinoteka_db::repositories::{MovieRepo, RatingRepo, ReviewRepo, SessionRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: "not-a-real-hash".to_string(),
            role: "user".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn new_movie(pool: &PgPool, title: &str) -> kinoteka_db::models::movie::Movie {
    MovieRepo::create(
        pool,
        &CreateMovie {
            kind: None,
            title: title.to_string(),
            release_date: None,
            description: None,
            trailer_url: None,
            genre_ids: Vec::new(),
            country_ids: Vec::new(),
        },
    )
    .await
    .unwrap()
}

fn new_review(movie_id: i64, title: &str) -> CreateReview {
    CreateReview {
        kind: "positive".to_string(),
        title: title.to_string(),
        text: "Worth watching twice.".to_string(),
        movie_id,
    }
}

// ---------------------------------------------------------------------------
// Test: Ratings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_rating_defaults_and_lookup(pool: PgPool) {
    let user = new_user(&pool, "watcher").await;
    let movie = new_movie(&pool, "Alien").await;

    let rating = RatingRepo::create(
        &pool,
        user.id,
        &CreateRating {
            movie_id: movie.id,
            rate: Some(8),
            is_watched: None,
        },
    )
    .await
    .unwrap();
    assert!(rating.is_watched, "is_watched defaults to true");
    assert_eq!(rating.rate, Some(8));

    let found = RatingRepo::find_by_user_and_movie(&pool, user.id, movie.id)
        .await
        .unwrap()
        .expect("rating must be found");
    assert_eq!(found.id, rating.id);

    let none = RatingRepo::find_by_user_and_movie(&pool, user.id, 999_999)
        .await
        .unwrap();
    assert!(none.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rating_update_partial(pool: PgPool) {
    let user = new_user(&pool, "revisor").await;
    let movie = new_movie(&pool, "Alien").await;
    let rating = RatingRepo::create(
        &pool,
        user.id,
        &CreateRating {
            movie_id: movie.id,
            rate: Some(4),
            is_watched: Some(false),
        },
    )
    .await
    .unwrap();

    let updated = RatingRepo::update(
        &pool,
        rating.id,
        &UpdateRating {
            rate: Some(9),
            is_watched: None,
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");

    assert_eq!(updated.rate, Some(9));
    assert!(!updated.is_watched, "omitted field survives");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rating_list_invalid_rate_is_empty(pool: PgPool) {
    let user = new_user(&pool, "lister").await;
    let movie = new_movie(&pool, "Alien").await;
    RatingRepo::create(
        &pool,
        user.id,
        &CreateRating {
            movie_id: movie.id,
            rate: Some(5),
            is_watched: None,
        },
    )
    .await
    .unwrap();

    let params = RatingListParams {
        rate: Some("five".into()),
        ..Default::default()
    };
    let ratings = RatingRepo::list(&pool, &params).await.unwrap();
    assert!(ratings.is_empty(), "Unparseable rate filters to nothing");

    let params = RatingListParams {
        rate: Some("5".into()),
        ..Default::default()
    };
    let ratings = RatingRepo::list(&pool, &params).await.unwrap();
    assert_eq!(ratings.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: Reviews
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_review_status_gated_by_allow_status(pool: PgPool) {
    let user = new_user(&pool, "author").await;
    let movie = new_movie(&pool, "Alien").await;
    let review = ReviewRepo::create(&pool, user.id, &new_review(movie.id, "First take"))
        .await
        .unwrap();
    assert_eq!(review.status, "in_progress");

    // Without allow_status the moderation column stays put.
    let input = UpdateReview {
        title: Some("Second take".into()),
        status: Some("approved".into()),
        ..Default::default()
    };
    let updated = ReviewRepo::update(&pool, review.id, &input, false)
        .await
        .unwrap()
        .expect("update should return the row");
    assert_eq!(updated.title, "Second take");
    assert_eq!(updated.status, "in_progress");

    // With allow_status it transitions.
    let updated = ReviewRepo::update(&pool, review.id, &input, true)
        .await
        .unwrap()
        .expect("update should return the row");
    assert_eq!(updated.status, "approved");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_review_bulk_set_status(pool: PgPool) {
    let user = new_user(&pool, "prolific").await;
    let movie = new_movie(&pool, "Alien").await;

    let mut ids = Vec::new();
    for i in 0..3 {
        let review = ReviewRepo::create(&pool, user.id, &new_review(movie.id, &format!("Take {i}")))
            .await
            .unwrap();
        ids.push(review.id);
    }
    let untouched = ReviewRepo::create(&pool, user.id, &new_review(movie.id, "Spared"))
        .await
        .unwrap();

    // Unknown ids are skipped, not an error.
    ids.push(999_999);
    let updated = ReviewRepo::bulk_set_status(&pool, &ids, "rejected")
        .await
        .unwrap();
    assert_eq!(updated, 3);

    let spared = ReviewRepo::find_by_id(&pool, untouched.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(spared.status, "in_progress");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_review_list_resolves_names_and_filters(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let movie = new_movie(&pool, "Alien").await;

    ReviewRepo::create(&pool, alice.id, &new_review(movie.id, "By Alice"))
        .await
        .unwrap();
    ReviewRepo::create(&pool, bob.id, &new_review(movie.id, "By Bob"))
        .await
        .unwrap();

    let params = ReviewListParams {
        user: Some(alice.id),
        ..Default::default()
    };
    let reviews = ReviewRepo::list(&pool, &params).await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].username, "alice");
    assert_eq!(reviews[0].movie_title, "Alien");
}

// ---------------------------------------------------------------------------
// Test: Aggregated user statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_user_stats_distinct_counts(pool: PgPool) {
    let user = new_user(&pool, "active").await;
    let m1 = new_movie(&pool, "Alien").await;
    let m2 = new_movie(&pool, "Solaris").await;

    // Two ratings: one with a rate, one watch-only.
    RatingRepo::create(
        &pool,
        user.id,
        &CreateRating {
            movie_id: m1.id,
            rate: Some(8),
            is_watched: None,
        },
    )
    .await
    .unwrap();
    RatingRepo::create(
        &pool,
        user.id,
        &CreateRating {
            movie_id: m2.id,
            rate: None,
            is_watched: Some(true),
        },
    )
    .await
    .unwrap();

    // Three reviews. Joining ratings and reviews multiplies rows, so a
    // non-DISTINCT count would report 6.
    for i in 0..3 {
        ReviewRepo::create(&pool, user.id, &new_review(m1.id, &format!("Take {i}")))
            .await
            .unwrap();
    }

    let users = UserRepo::list_annotated(&pool, &UserListParams::default())
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].watches, 2);
    assert_eq!(users[0].rates, 1);
    assert_eq!(users[0].reviews, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_delete_restricted_while_active(pool: PgPool) {
    let user = new_user(&pool, "tangled").await;
    let movie = new_movie(&pool, "Alien").await;
    ReviewRepo::create(&pool, user.id, &new_review(movie.id, "Keeps me here"))
        .await
        .unwrap();

    let result = UserRepo::delete(&pool, user.id).await;
    assert!(result.is_err(), "Deleting a user with reviews should fail");
}

// ---------------------------------------------------------------------------
// Test: Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_session_lifecycle(pool: PgPool) {
    let user = new_user(&pool, "sessioned").await;
    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "hash-one".to_string(),
            expires_at: Utc::now() + Duration::days(14),
        },
    )
    .await
    .unwrap();

    let found = SessionRepo::find_active_by_hash(&pool, "hash-one")
        .await
        .unwrap()
        .expect("live session must be found");
    assert_eq!(found.id, session.id);

    SessionRepo::revoke(&pool, session.id).await.unwrap();
    let gone = SessionRepo::find_active_by_hash(&pool, "hash-one")
        .await
        .unwrap();
    assert!(gone.is_none(), "revoked session must not resolve");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_session_not_found(pool: PgPool) {
    let user = new_user(&pool, "expired").await;
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "hash-old".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        },
    )
    .await
    .unwrap();

    let found = SessionRepo::find_active_by_hash(&pool, "hash-old")
        .await
        .unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_revoke_all_for_user(pool: PgPool) {
    let user = new_user(&pool, "multi").await;
    for i in 0..3 {
        SessionRepo::create(
            &pool,
            &CreateSession {
                user_id: user.id,
                refresh_token_hash: format!("hash-{i}"),
                expires_at: Utc::now() + Duration::days(14),
            },
        )
        .await
        .unwrap();
    }

    let revoked = SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap();
    assert_eq!(revoked, 3);

    for i in 0..3 {
        assert!(SessionRepo::find_active_by_hash(&pool, &format!("hash-{i}"))
            .await
            .unwrap()
            .is_none());
    }
}
