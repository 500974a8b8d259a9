//! Staff moderation endpoints under `/admin`.
//!
//! Bulk review moderation and the per-review PDF export live here rather
//! than on the public `/reviews` surface.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::Json;
use kinoteka_core::choices::{REVIEW_STATUS_APPROVED, REVIEW_STATUS_REJECTED};
use kinoteka_core::error::CoreError;
use kinoteka_core::http::content_disposition;
use kinoteka_core::types::DbId;
use kinoteka_db::repositories::ReviewRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::pdf;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the bulk moderation endpoints.
#[derive(Debug, Deserialize)]
pub struct BulkReviewRequest {
    pub ids: Vec<DbId>,
}

/// Result of a bulk moderation call.
#[derive(Debug, Serialize)]
pub struct BulkReviewResponse {
    pub updated: u64,
}

/// POST /api/v1/admin/reviews/approve
///
/// Staff-only bulk approval. Unknown ids are skipped; the count of rows
/// actually updated is returned.
pub async fn approve_reviews(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Json(input): Json<BulkReviewRequest>,
) -> AppResult<Json<DataResponse<BulkReviewResponse>>> {
    bulk_set_status(&state, &input.ids, REVIEW_STATUS_APPROVED).await
}

/// POST /api/v1/admin/reviews/reject
///
/// Staff-only bulk rejection.
pub async fn reject_reviews(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Json(input): Json<BulkReviewRequest>,
) -> AppResult<Json<DataResponse<BulkReviewResponse>>> {
    bulk_set_status(&state, &input.ids, REVIEW_STATUS_REJECTED).await
}

/// GET /api/v1/admin/reviews/{id}/pdf
///
/// Staff-only PDF export of one review. The download filename carries
/// the author and movie name, RFC 5987 encoded so non-ASCII survives.
pub async fn review_pdf(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    let review = ReviewRepo::find_with_names(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Review", id }))?;

    let bytes = pdf::render_review(&review)?;
    let filename = pdf::review_filename(&review);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    let disposition = format!("attachment; {}", content_disposition(&filename));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::InternalError(format!("Invalid header value: {e}")))?,
    );
    Ok((headers, bytes))
}

async fn bulk_set_status(
    state: &AppState,
    ids: &[DbId],
    status: &str,
) -> AppResult<Json<DataResponse<BulkReviewResponse>>> {
    if ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No review ids given".into(),
        )));
    }
    let updated = ReviewRepo::bulk_set_status(&state.pool, ids, status).await?;
    tracing::info!(count = updated, status, "Bulk review moderation applied");
    Ok(Json(DataResponse {
        data: BulkReviewResponse { updated },
    }))
}
