//! Repository for the `movies` table and its genre/country links.

use kinoteka_core::types::DbId;
use sqlx::PgPool;

use crate::models::country::Country;
use crate::models::genre::Genre;
use crate::models::movie::{CreateMovie, Movie, MovieListParams, MovieWithRate, UpdateMovie};
use crate::models::person::PersonRef;
use crate::sort::order_clause;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, kind, title, release_date, description, poster_path, trailer_url, created_at, updated_at";

/// Sort keys accepted by the annotated listing.
const SORT_KEYS: &[(&str, &str)] = &[
    ("rate", "rate"),
    ("release_date", "m.release_date"),
    ("title", "m.title"),
];

/// Provides CRUD, annotated-listing, and facet operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a movie and its genre/country links in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO movies (kind, title, release_date, description, trailer_url)
             VALUES (COALESCE($1, 'movie'), $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(input.release_date)
            .bind(&input.description)
            .bind(&input.trailer_url)
            .fetch_one(&mut *tx)
            .await?;

        for genre_id in &input.genre_ids {
            sqlx::query("INSERT INTO movie_genres (movie_id, genre_id) VALUES ($1, $2)")
                .bind(movie.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }
        for country_id in &input.country_ids {
            sqlx::query("INSERT INTO movie_countries (movie_id, country_id) VALUES ($1, $2)")
                .bind(movie.id)
                .bind(country_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(movie)
    }

    /// Find a movie by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a movie with this exact (title, release_date) pair exists.
    ///
    /// Backed by the `uq_movies_title_release_date` index; the handler
    /// checks this first to return a validation error instead of a bare
    /// constraint conflict.
    pub async fn exists_by_title_and_date(
        pool: &PgPool,
        title: &str,
        release_date: Option<chrono::NaiveDate>,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM movies
             WHERE title = $1
               AND COALESCE(release_date, DATE '0001-01-01')
                   = COALESCE($2, DATE '0001-01-01')",
        )
        .bind(title)
        .bind(release_date)
        .fetch_optional(pool)
        .await?;
        Ok(found.is_some())
    }

    /// Annotated listing: each movie with the average of its non-null
    /// rating values (unrated movies average to 0), filtered and sorted
    /// by the caller's parameters. Default order is best-rated first.
    pub async fn list_annotated(
        pool: &PgPool,
        params: &MovieListParams,
    ) -> Result<Vec<MovieWithRate>, sqlx::Error> {
        // An unparseable year can never match any release date.
        let year: Option<i32> = match &params.year {
            Some(raw) => match raw.parse() {
                Ok(y) => Some(y),
                Err(_) => return Ok(Vec::new()),
            },
            None => None,
        };

        let order = order_clause(params.sort.as_deref(), SORT_KEYS, "rate DESC");
        let query = format!(
            "SELECT m.id, m.kind, m.title, m.release_date,
                    EXTRACT(YEAR FROM m.release_date)::int4 AS release_year,
                    m.description, m.poster_path, m.trailer_url,
                    m.created_at, m.updated_at,
                    COALESCE(AVG(r.rate), 0)::float8 AS rate
             FROM movies m
             LEFT JOIN ratings r ON r.movie_id = m.id AND r.rate IS NOT NULL
             WHERE ($1::text IS NULL OR m.title ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR m.kind = $2)
               AND ($3::int4 IS NULL OR EXTRACT(YEAR FROM m.release_date)::int4 = $3)
               AND ($4::text IS NULL OR EXISTS (
                       SELECT 1 FROM movie_genres mg
                       JOIN genres g ON g.id = mg.genre_id
                       WHERE mg.movie_id = m.id AND g.name = $4))
               AND ($5::text IS NULL OR EXISTS (
                       SELECT 1 FROM movie_countries mc
                       JOIN countries c ON c.id = mc.country_id
                       WHERE mc.movie_id = m.id AND c.name = $5))
             GROUP BY m.id
             ORDER BY {order}, m.id"
        );
        sqlx::query_as::<_, MovieWithRate>(&query)
            .bind(&params.search)
            .bind(&params.kind)
            .bind(year)
            .bind(&params.genre)
            .bind(&params.country)
            .fetch_all(pool)
            .await
    }

    /// Average of the movie's non-null rating values; 0 when unrated.
    pub async fn avg_rate(pool: &PgPool, movie_id: DbId) -> Result<f64, sqlx::Error> {
        let (avg,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(AVG(rate), 0)::float8 FROM ratings
             WHERE movie_id = $1 AND rate IS NOT NULL",
        )
        .bind(movie_id)
        .fetch_one(pool)
        .await?;
        Ok(avg)
    }

    /// Number of rating rows for the movie (watch-only entries included).
    pub async fn rates_count(pool: &PgPool, movie_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ratings WHERE movie_id = $1")
            .bind(movie_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Genres linked to the movie, by name.
    pub async fn genres_for(pool: &PgPool, movie_id: DbId) -> Result<Vec<Genre>, sqlx::Error> {
        sqlx::query_as::<_, Genre>(
            "SELECT g.id, g.name FROM genres g
             JOIN movie_genres mg ON mg.genre_id = g.id
             WHERE mg.movie_id = $1
             ORDER BY g.name",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Countries linked to the movie, by name.
    pub async fn countries_for(pool: &PgPool, movie_id: DbId) -> Result<Vec<Country>, sqlx::Error> {
        sqlx::query_as::<_, Country>(
            "SELECT c.id, c.name FROM countries c
             JOIN movie_countries mc ON mc.country_id = c.id
             WHERE mc.movie_id = $1
             ORDER BY c.name",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// People credited on the movie with the given profession name
    /// (`actor` or `director`).
    pub async fn people_for(
        pool: &PgPool,
        movie_id: DbId,
        profession: &str,
    ) -> Result<Vec<PersonRef>, sqlx::Error> {
        sqlx::query_as::<_, PersonRef>(
            "SELECT p.id, p.full_name FROM people p
             JOIN professions pr ON pr.person_id = p.id
             WHERE pr.movie_id = $1 AND pr.name = $2
             ORDER BY p.full_name",
        )
        .bind(movie_id)
        .bind(profession)
        .fetch_all(pool)
        .await
    }

    /// Update a movie. Only non-`None` fields are applied; when
    /// `genre_ids` / `country_ids` are present the link sets are replaced
    /// wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE movies SET
                kind = COALESCE($2, kind),
                title = COALESCE($3, title),
                release_date = COALESCE($4, release_date),
                description = COALESCE($5, description),
                trailer_url = COALESCE($6, trailer_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(movie) = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(input.release_date)
            .bind(&input.description)
            .bind(&input.trailer_url)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(genre_ids) = &input.genre_ids {
            sqlx::query("DELETE FROM movie_genres WHERE movie_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for genre_id in genre_ids {
                sqlx::query("INSERT INTO movie_genres (movie_id, genre_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(genre_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }
        if let Some(country_ids) = &input.country_ids {
            sqlx::query("DELETE FROM movie_countries WHERE movie_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for country_id in country_ids {
                sqlx::query("INSERT INTO movie_countries (movie_id, country_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(country_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(movie))
    }

    /// Swap the stored poster path, returning the previous one so the
    /// caller can remove the old file after the row is committed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace_poster(
        pool: &PgPool,
        id: DbId,
        poster_path: Option<&str>,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let old: Option<(Option<String>,)> =
            sqlx::query_as("SELECT poster_path FROM movies WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((old_path,)) = old else {
            return Ok(None);
        };

        sqlx::query("UPDATE movies SET poster_path = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(poster_path)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(old_path))
    }

    /// Delete a movie. Fails with a foreign-key violation while dependent
    /// ratings, reviews, or professions exist (restrict-on-delete); the
    /// genre/country links cascade.
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Distinct release years, newest first. Facet source for the movie
    /// filter-options endpoint.
    pub async fn distinct_years(pool: &PgPool) -> Result<Vec<i32>, sqlx::Error> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            "SELECT DISTINCT EXTRACT(YEAR FROM release_date)::int4 AS year
             FROM movies
             WHERE release_date IS NOT NULL
             ORDER BY year DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(year,)| year).collect())
    }
}
