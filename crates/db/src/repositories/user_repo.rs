//! Repository for the `users` table.

use kinoteka_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserListParams, UserWithStats};
use crate::sort::order_clause;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, created_at, updated_at";

/// Sort keys accepted by the annotated listing.
const SORT_KEYS: &[(&str, &str)] = &[
    ("username", "u.username"),
    ("watches", "watches"),
    ("rates", "rates"),
    ("reviews", "reviews"),
];

/// Provides CRUD and annotated-listing operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Annotated listing: per-user watch, rate, and review counts in one
    /// query, filtered and sorted by the caller's parameters.
    ///
    /// The DISTINCT counts matter: joining both ratings and reviews
    /// multiplies rows, a plain COUNT would double-count.
    pub async fn list_annotated(
        pool: &PgPool,
        params: &UserListParams,
    ) -> Result<Vec<UserWithStats>, sqlx::Error> {
        let order = order_clause(params.sort.as_deref(), SORT_KEYS, "u.username ASC");
        let query = format!(
            "SELECT u.id, u.username, u.email, u.role, u.created_at,
                    COUNT(DISTINCT r.id) FILTER (WHERE r.is_watched) AS watches,
                    COUNT(DISTINCT r.id) FILTER (WHERE r.rate IS NOT NULL) AS rates,
                    COUNT(DISTINCT rv.id) AS reviews
             FROM users u
             LEFT JOIN ratings r ON r.user_id = u.id
             LEFT JOIN reviews rv ON rv.user_id = u.id
             WHERE ($1::text IS NULL OR u.username ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR u.role = $2)
             GROUP BY u.id
             ORDER BY {order}, u.id"
        );
        sqlx::query_as::<_, UserWithStats>(&query)
            .bind(&params.search)
            .bind(&params.role)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                role = COALESCE($4, role),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.role)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user. Fails with a foreign-key violation while dependent
    /// ratings or reviews exist (restrict-on-delete).
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
