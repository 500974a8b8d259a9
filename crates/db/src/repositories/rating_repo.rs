//! Repository for the `ratings` table.

use kinoteka_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{CreateRating, Rating, RatingListParams, UpdateRating};
use crate::sort::order_clause;

const COLUMNS: &str = "id, movie_id, user_id, rate, is_watched, created_at, updated_at";

/// Sort keys accepted by the listing.
const SORT_KEYS: &[(&str, &str)] = &[
    ("created_at", "created_at"),
    ("updated_at", "updated_at"),
];

/// Provides CRUD operations for ratings.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert a new rating for the given user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateRating,
    ) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (movie_id, user_id, rate, is_watched)
             VALUES ($1, $2, $3, COALESCE($4, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(input.movie_id)
            .bind(user_id)
            .bind(input.rate)
            .bind(input.is_watched)
            .fetch_one(pool)
            .await
    }

    /// Find a rating by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ratings WHERE id = $1");
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The caller's own rating of a movie, if any. Embedded in the movie
    /// detail payload for authenticated requests.
    pub async fn find_by_user_and_movie(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ratings
             WHERE user_id = $1 AND movie_id = $2
             ORDER BY updated_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered listing, newest first by default.
    ///
    /// An unparseable `rate` value can never match, so it yields an empty
    /// result rather than an error.
    pub async fn list(
        pool: &PgPool,
        params: &RatingListParams,
    ) -> Result<Vec<Rating>, sqlx::Error> {
        let rate: Option<i16> = match &params.rate {
            Some(raw) => match raw.parse() {
                Ok(value) => Some(value),
                Err(_) => return Ok(Vec::new()),
            },
            None => None,
        };

        let order = order_clause(params.sort.as_deref(), SORT_KEYS, "created_at DESC");
        let query = format!(
            "SELECT {COLUMNS} FROM ratings
             WHERE ($1::int8 IS NULL OR movie_id = $1)
               AND ($2::int8 IS NULL OR user_id = $2)
               AND ($3::int2 IS NULL OR rate = $3)
             ORDER BY {order}, id"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(params.movie)
            .bind(params.user)
            .bind(rate)
            .fetch_all(pool)
            .await
    }

    /// All ratings for one movie, newest first.
    pub async fn list_by_movie(pool: &PgPool, movie_id: DbId) -> Result<Vec<Rating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ratings WHERE movie_id = $1 ORDER BY created_at DESC, id"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    /// Update a rating. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRating,
    ) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!(
            "UPDATE ratings SET
                rate = COALESCE($2, rate),
                is_watched = COALESCE($3, is_watched),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .bind(input.rate)
            .bind(input.is_watched)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rating. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
