//! Repository for the `genres` table.

use kinoteka_core::types::DbId;
use sqlx::PgPool;

use crate::models::genre::{CreateGenre, Genre, GenreListParams};
use crate::sort::order_clause;

const SORT_KEYS: &[(&str, &str)] = &[("name", "name")];

/// Provides CRUD operations for genres.
pub struct GenreRepo;

impl GenreRepo {
    /// Insert a new genre, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateGenre) -> Result<Genre, sqlx::Error> {
        sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES ($1) RETURNING id, name")
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a genre by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered listing, ordered by name.
    pub async fn list(pool: &PgPool, params: &GenreListParams) -> Result<Vec<Genre>, sqlx::Error> {
        let order = order_clause(params.sort.as_deref(), SORT_KEYS, "name ASC");
        let query = format!(
            "SELECT id, name FROM genres
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
             ORDER BY {order}, id"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(&params.search)
            .fetch_all(pool)
            .await
    }

    /// All genre names, for the movie filter-options facet.
    pub async fn list_names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM genres ORDER BY name")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Rename a genre. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>("UPDATE genres SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a genre. Fails with a foreign-key violation while movies
    /// reference it (restrict-on-delete).
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
