//! Repository for the `reviews` table.

use kinoteka_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{
    CreateReview, Review, ReviewListParams, ReviewWithNames, UpdateReview,
};
use crate::sort::order_clause;

const COLUMNS: &str =
    "id, kind, title, text, status, movie_id, user_id, created_at, updated_at";

/// Sort keys accepted by the listing.
const SORT_KEYS: &[(&str, &str)] = &[
    ("created_at", "rv.created_at"),
    ("updated_at", "rv.updated_at"),
];

/// Provides CRUD and moderation operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review for the given author. The status always starts
    /// at `in_progress`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (kind, title, text, movie_id, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.text)
            .bind(input.movie_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a review by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A review with author and movie display names resolved, for the PDF
    /// export.
    pub async fn find_with_names(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReviewWithNames>, sqlx::Error> {
        sqlx::query_as::<_, ReviewWithNames>(
            "SELECT rv.id, rv.kind, rv.title, rv.text, rv.status,
                    rv.movie_id, m.title AS movie_title,
                    rv.user_id, u.username,
                    rv.created_at, rv.updated_at
             FROM reviews rv
             JOIN movies m ON m.id = rv.movie_id
             JOIN users u ON u.id = rv.user_id
             WHERE rv.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Filtered listing with display names, newest first by default.
    pub async fn list(
        pool: &PgPool,
        params: &ReviewListParams,
    ) -> Result<Vec<ReviewWithNames>, sqlx::Error> {
        let order = order_clause(params.sort.as_deref(), SORT_KEYS, "rv.created_at DESC");
        let query = format!(
            "SELECT rv.id, rv.kind, rv.title, rv.text, rv.status,
                    rv.movie_id, m.title AS movie_title,
                    rv.user_id, u.username,
                    rv.created_at, rv.updated_at
             FROM reviews rv
             JOIN movies m ON m.id = rv.movie_id
             JOIN users u ON u.id = rv.user_id
             WHERE ($1::int8 IS NULL OR rv.movie_id = $1)
               AND ($2::int8 IS NULL OR rv.user_id = $2)
               AND ($3::text IS NULL OR rv.kind = $3)
             ORDER BY {order}, rv.id"
        );
        sqlx::query_as::<_, ReviewWithNames>(&query)
            .bind(params.movie)
            .bind(params.user)
            .bind(&params.kind)
            .fetch_all(pool)
            .await
    }

    /// Update a review's content fields. Only non-`None` fields are
    /// applied; `allow_status` gates the moderation column so non-staff
    /// callers cannot transition it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
        allow_status: bool,
    ) -> Result<Option<Review>, sqlx::Error> {
        let status = if allow_status {
            input.status.as_deref()
        } else {
            None
        };
        let query = format!(
            "UPDATE reviews SET
                kind = COALESCE($2, kind),
                title = COALESCE($3, title),
                text = COALESCE($4, text),
                status = COALESCE($5, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.text)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Bulk moderation: set the status of every listed review. Returns
    /// the number of rows updated.
    pub async fn bulk_set_status(
        pool: &PgPool,
        ids: &[DbId],
        status: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reviews SET status = $2, updated_at = NOW() WHERE id = ANY($1)",
        )
        .bind(ids)
        .bind(status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a review. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
