//! Handlers for the `/movies` resource.
//!
//! The listing is annotated with the average rating in a single query;
//! the detail payload additionally embeds genres, countries, credited
//! actors and directors, the rating count, and (for authenticated
//! callers) the caller's own rating.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kinoteka_core::choices::{MOVIE_KINDS, PROFESSION_ACTOR, PROFESSION_DIRECTOR};
use kinoteka_core::error::CoreError;
use kinoteka_core::types::DbId;
use kinoteka_db::models::movie::{CreateMovie, Movie, MovieListParams, UpdateMovie};
use kinoteka_db::models::rating::Rating;
use kinoteka_db::repositories::{CountryRepo, GenreRepo, MovieRepo, RatingRepo};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::media::POSTERS_DIR;
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::FieldParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/movies
///
/// Public annotated listing, best-rated first by default.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let movies = MovieRepo::list_annotated(&state.pool, &params).await?;
    let payload = serde_json::to_value(movies)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// GET /api/v1/movies/{id}
///
/// Public detail view. When the caller presents a valid token their own
/// rating of the movie is embedded as `my_rating`.
pub async fn get_movie(
    State(state): State<AppState>,
    MaybeAuthUser(auth_user): MaybeAuthUser,
    Path(id): Path<DbId>,
    Query(fields): Query<FieldParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Movie", id }))?;

    let my_rating: Option<Rating> = match &auth_user {
        Some(user) => RatingRepo::find_by_user_and_movie(&state.pool, user.user_id, id).await?,
        None => None,
    };

    let payload = build_detail_payload(&state, movie, my_rating).await?;
    Ok(Json(DataResponse {
        data: kinoteka_core::fields::shape(payload, &fields.selection()),
    }))
}

/// POST /api/v1/movies
///
/// Staff-only. A (title, release date) pair that already exists is
/// rejected up front with a validation error.
pub async fn create_movie(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Json(input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<DataResponse<Movie>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must not be empty".into(),
        )));
    }
    if MovieRepo::exists_by_title_and_date(&state.pool, &input.title, input.release_date).await? {
        return Err(AppError::Core(CoreError::Validation(
            "A movie with this title and release date already exists".into(),
        )));
    }

    let movie = MovieRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// PUT /api/v1/movies/{id}
///
/// Staff-only partial update; present `genre_ids` / `country_ids` replace
/// the full association set.
pub async fn update_movie(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<Json<DataResponse<Movie>>> {
    let movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Movie", id }))?;
    Ok(Json(DataResponse { data: movie }))
}

/// DELETE /api/v1/movies/{id}
///
/// Staff-only. Fails with 409 while ratings, reviews, or credits still
/// reference the movie (restrict-on-delete). A stored poster file is
/// removed with the row.
pub async fn delete_movie(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Movie", id }))?;

    // Restrict-on-delete fires here before any file is touched.
    let deleted = MovieRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Movie", id }));
    }
    if let Some(poster_path) = &movie.poster_path {
        state.media.delete(poster_path).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/movies/{id}/ratings
///
/// All ratings of one movie, newest first.
pub async fn movie_ratings(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Rating>>>> {
    if MovieRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Movie", id }));
    }
    let ratings = RatingRepo::list_by_movie(&state.pool, id).await?;
    Ok(Json(DataResponse { data: ratings }))
}

/// POST /api/v1/movies/{id}/poster
///
/// Staff-only multipart upload (`file` field). Replaces any previous
/// poster; the old file is removed after the row is committed.
pub async fn upload_poster(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<Movie>>> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("poster.jpg").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((filename, data.to_vec()));
        }
        // ignore unknown fields
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let stored = state.media.save(POSTERS_DIR, &filename, &data).await?;

    let old = match MovieRepo::replace_poster(&state.pool, id, Some(&stored)).await? {
        Some(old) => old,
        None => {
            // Row vanished between upload and update; drop the orphan file.
            state.media.delete(&stored).await?;
            return Err(AppError::Core(CoreError::NotFound { entity: "Movie", id }));
        }
    };
    if let Some(old_path) = old {
        state.media.delete(&old_path).await?;
    }

    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Movie", id }))?;
    Ok(Json(DataResponse { data: movie }))
}

/// DELETE /api/v1/movies/{id}/poster
///
/// Staff-only. Clears the stored path and removes the file.
pub async fn delete_poster(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let old = MovieRepo::replace_poster(&state.pool, id, None)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Movie", id }))?;
    if let Some(old_path) = old {
        state.media.delete(&old_path).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/movies/filter-options
///
/// Facet values for the movie filter panel (kinds, release years, genre
/// and country names). Cached for an hour.
pub async fn filter_options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Value>>> {
    if let Some(cached) = state.filter_cache.movies.get().await {
        return Ok(Json(DataResponse { data: cached }));
    }

    let years = MovieRepo::distinct_years(&state.pool).await?;
    let genres = GenreRepo::list_names(&state.pool).await?;
    let countries = CountryRepo::list_names(&state.pool).await?;

    let payload = json!({
        "kinds": MOVIE_KINDS,
        "years": years,
        "genres": genres,
        "countries": countries,
        "sort_options": [
            { "label": "Highest rated", "filter": "-rate" },
            { "label": "Lowest rated", "filter": "rate" },
            { "label": "Newest releases", "filter": "-release_date" },
            { "label": "Oldest releases", "filter": "release_date" },
            { "label": "Title A-Z", "filter": "title" },
            { "label": "Title Z-A", "filter": "-title" },
        ],
    });
    state.filter_cache.movies.put(payload.clone()).await;
    Ok(Json(DataResponse { data: payload }))
}

/// Assemble the movie detail payload with embedded associations.
async fn build_detail_payload(
    state: &AppState,
    movie: Movie,
    my_rating: Option<Rating>,
) -> AppResult<Value> {
    let rate = MovieRepo::avg_rate(&state.pool, movie.id).await?;
    let rates_count = MovieRepo::rates_count(&state.pool, movie.id).await?;
    let genres = MovieRepo::genres_for(&state.pool, movie.id).await?;
    let countries = MovieRepo::countries_for(&state.pool, movie.id).await?;
    let actors = MovieRepo::people_for(&state.pool, movie.id, PROFESSION_ACTOR).await?;
    let directors = MovieRepo::people_for(&state.pool, movie.id, PROFESSION_DIRECTOR).await?;

    let mut payload = serde_json::to_value(movie)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?;
    let Value::Object(map) = &mut payload else {
        return Err(AppError::InternalError("Movie did not serialize to an object".into()));
    };
    map.insert("rate".into(), json!(rate));
    map.insert("rates_count".into(), json!(rates_count));
    map.insert("genres".into(), serde_json::to_value(genres).unwrap_or_default());
    map.insert("countries".into(), serde_json::to_value(countries).unwrap_or_default());
    map.insert("actors".into(), serde_json::to_value(actors).unwrap_or_default());
    map.insert("directors".into(), serde_json::to_value(directors).unwrap_or_default());
    map.insert("my_rating".into(), serde_json::to_value(my_rating).unwrap_or_default());
    Ok(payload)
}
