//! Repository for the `people` table.

use chrono::Utc;
use kinoteka_core::birthday::days_to_birthday;
use kinoteka_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{
    CreatePerson, Person, PersonListParams, PersonWithBirthday, UpdatePerson,
};
use crate::sort::order_clause;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, full_name, birth_date, sex, biography_path, photo_path, created_at, updated_at";

/// Sort keys accepted by the listing.
const SORT_KEYS: &[(&str, &str)] = &[("full_name", "full_name"), ("birth_date", "birth_date")];

/// Provides CRUD and birthday-annotated listing operations for people.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO people (full_name, birth_date, sex)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.full_name)
            .bind(input.birth_date)
            .bind(&input.sex)
            .fetch_one(pool)
            .await
    }

    /// Find a person by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered listing, default order youngest first.
    pub async fn list(
        pool: &PgPool,
        params: &PersonListParams,
    ) -> Result<Vec<Person>, sqlx::Error> {
        let order = order_clause(params.sort.as_deref(), SORT_KEYS, "birth_date DESC");
        let query = format!(
            "SELECT {COLUMNS} FROM people
             WHERE ($1::text IS NULL OR full_name ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR sex = $2)
             ORDER BY {order} NULLS LAST, id"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&params.search)
            .bind(&params.sex)
            .fetch_all(pool)
            .await
    }

    /// Birthday-annotated listing: people with a known birth date, each
    /// carrying the days until their next birthday, soonest first.
    ///
    /// One query fetches the rows; the countdown is pure arithmetic on
    /// today's UTC date, so there is no per-row round trip.
    pub async fn list_by_upcoming_birthday(
        pool: &PgPool,
    ) -> Result<Vec<PersonWithBirthday>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE birth_date IS NOT NULL");
        let people = sqlx::query_as::<_, Person>(&query).fetch_all(pool).await?;

        let today = Utc::now().date_naive();
        let mut annotated: Vec<PersonWithBirthday> = people
            .into_iter()
            .filter_map(|person| {
                let birth_date = person.birth_date?;
                Some(PersonWithBirthday {
                    id: person.id,
                    full_name: person.full_name,
                    birth_date,
                    sex: person.sex,
                    photo_path: person.photo_path,
                    days_to_birthday: days_to_birthday(birth_date, today),
                })
            })
            .collect();
        annotated.sort_by_key(|person| (person.days_to_birthday, person.id));
        Ok(annotated)
    }

    /// Update a person. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE people SET
                full_name = COALESCE($2, full_name),
                birth_date = COALESCE($3, birth_date),
                sex = COALESCE($4, sex),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(input.birth_date)
            .bind(&input.sex)
            .fetch_optional(pool)
            .await
    }

    /// Store the photo file path. Returns the previous path, or `None`
    /// if no row with the given `id` exists.
    pub async fn replace_photo(
        pool: &PgPool,
        id: DbId,
        photo_path: Option<&str>,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        Self::replace_file_column(pool, id, "photo_path", photo_path).await
    }

    /// Store the biography file path. Returns the previous path, or
    /// `None` if no row with the given `id` exists.
    pub async fn replace_biography(
        pool: &PgPool,
        id: DbId,
        biography_path: Option<&str>,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        Self::replace_file_column(pool, id, "biography_path", biography_path).await
    }

    async fn replace_file_column(
        pool: &PgPool,
        id: DbId,
        column: &'static str,
        path: Option<&str>,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {column} FROM people WHERE id = $1 FOR UPDATE");
        let old: Option<(Option<String>,)> = sqlx::query_as(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((old_path,)) = old else {
            return Ok(None);
        };

        let update = format!("UPDATE people SET {column} = $2, updated_at = NOW() WHERE id = $1");
        sqlx::query(&update)
            .bind(id)
            .bind(path)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(old_path))
    }

    /// Delete a person. Fails with a foreign-key violation while
    /// profession credits exist (restrict-on-delete).
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
