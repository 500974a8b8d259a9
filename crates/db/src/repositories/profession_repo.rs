//! Repository for the `professions` table (movie <-> person credits).

use kinoteka_core::types::DbId;
use sqlx::PgPool;

use crate::models::profession::{
    CreateProfession, Profession, ProfessionListParams, ProfessionWithNames, UpdateProfession,
};

const COLUMNS: &str = "id, name, movie_id, person_id";

/// Provides CRUD operations for professions.
pub struct ProfessionRepo;

impl ProfessionRepo {
    /// Insert a new credit, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProfession,
    ) -> Result<Profession, sqlx::Error> {
        let query = format!(
            "INSERT INTO professions (name, movie_id, person_id)
             VALUES (COALESCE($1, 'actor'), $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profession>(&query)
            .bind(&input.name)
            .bind(input.movie_id)
            .bind(input.person_id)
            .fetch_one(pool)
            .await
    }

    /// Find a credit by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM professions WHERE id = $1");
        sqlx::query_as::<_, Profession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered listing with movie title and person name resolved in the
    /// same query (no per-row lookups).
    pub async fn list(
        pool: &PgPool,
        params: &ProfessionListParams,
    ) -> Result<Vec<ProfessionWithNames>, sqlx::Error> {
        sqlx::query_as::<_, ProfessionWithNames>(
            "SELECT pr.id, pr.name, pr.movie_id, m.title AS movie_title,
                    pr.person_id, p.full_name AS person_name
             FROM professions pr
             JOIN movies m ON m.id = pr.movie_id
             JOIN people p ON p.id = pr.person_id
             WHERE ($1::text IS NULL OR pr.name = $1)
               AND ($2::int8 IS NULL OR pr.movie_id = $2)
               AND ($3::int8 IS NULL OR pr.person_id = $3)
             ORDER BY pr.name, pr.id",
        )
        .bind(&params.name)
        .bind(params.movie)
        .bind(params.person)
        .fetch_all(pool)
        .await
    }

    /// Update a credit. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfession,
    ) -> Result<Option<Profession>, sqlx::Error> {
        let query = format!(
            "UPDATE professions SET
                name = COALESCE($2, name),
                movie_id = COALESCE($3, movie_id),
                person_id = COALESCE($4, person_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profession>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.movie_id)
            .bind(input.person_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a credit. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM professions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
