//! HTTP-level integration tests for signup, login, refresh, and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, create_user_with_token, login_user, post_json, post_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Successful signup returns 201 with tokens and the `user` role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "newcomer",
        "email": "newcomer@test.com",
        "password1": "a-strong-password",
        "password2": "a-strong-password",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string(), "response must contain access_token");
    assert!(json["refresh_token"].is_string(), "response must contain refresh_token");
    assert_eq!(json["user"]["username"], "newcomer");
    assert_eq!(json["user"]["role"], "user");
}

/// Mismatched password fields return 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_password_mismatch(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "mismatch",
        "email": "mismatch@test.com",
        "password1": "a-strong-password",
        "password2": "a-different-password",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A password under eight characters returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_weak_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "weakpw",
        "email": "weakpw@test.com",
        "password1": "short",
        "password2": "short",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A taken username returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_username(pool: PgPool) {
    create_test_user(&pool, "taken", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "taken",
        "email": "other@test.com",
        "password1": "a-strong-password",
        "password2": "a-strong-password",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// An authenticated caller cannot sign up again.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_while_authenticated_forbidden(pool: PgPool) {
    let (_user, token) = create_user_with_token(&pool, "already", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "second",
        "email": "second@test.com",
        "password1": "a-strong-password",
        "password2": "a-strong-password",
    });
    let response = post_json_auth(app, "/api/v1/auth/signup", &token, body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

/// Successful login returns 200 with access_token, refresh_token, and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "loginuser", "moderator").await;
    let app = common::build_test_app(pool);

    let json = login_user(app, "loginuser", &password).await;

    assert!(json["access_token"].is_string(), "response must contain access_token");
    assert!(json["expires_in"].is_number(), "response must contain expires_in");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "moderator");
}

/// Login with a nonexistent username returns 401 with a specific message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "User not found.");
}

/// Login with an incorrect password returns 401 with a specific message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    create_test_user(&pool, "wrongpw", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Incorrect password.");
}

/// A valid refresh token returns new, rotated tokens.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_refresh_rotates(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "refresher", "user").await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "refresher", &password).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(json["refresh_token"], login_json["refresh_token"]);

    // The old token was revoked by the rotation.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes every session; the refresh token stops working.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "leaver", "user").await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "leaver", &password).await;
    let access_token = login_json["access_token"].as_str().unwrap();
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/auth/logout",
        access_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout without a token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/logout", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
