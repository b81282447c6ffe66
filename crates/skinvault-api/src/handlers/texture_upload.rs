use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::Response,
};
use skinvault_core::models::{ApiEnvelope, BatchSummary};
use skinvault_core::AppError;

use crate::error::{HttpAppError, METHOD_NOT_ALLOWED_MESSAGE};
use crate::services::upload::TextureBatchService;
use crate::state::AppState;
use crate::utils::envelope::envelope_response;
use crate::utils::multipart::collect_uploaded_files;

/// Upload textures handler
///
/// Accepts one or more PNG skin textures under the multipart field `images`
/// (or `images[]`) and stores each one that passes validation and is not
/// already known by content hash.
///
/// Request-level problems (no files, database unreachable) fail the whole
/// request. Everything that goes wrong with an individual file is reported in
/// `data.results` of an HTTP 200 response; `success` is true when at least
/// one file was stored.
#[utoipa::path(
    post,
    path = "/api/v0/textures",
    tag = "textures",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Batch processed, see per-file results", body = ApiEnvelope<BatchSummary>),
        (status = 400, description = "No files under the images field", body = ApiEnvelope<BatchSummary>),
        (status = 405, description = "Method other than POST", body = ApiEnvelope<BatchSummary>),
        (status = 413, description = "Request body too large", body = ApiEnvelope<BatchSummary>),
        (status = 503, description = "Database unreachable", body = ApiEnvelope<BatchSummary>)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_textures"))]
pub async fn upload_textures(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let files = collect_uploaded_files(multipart?).await?;

    state.repository.ping().await?;

    let summary = TextureBatchService::from_state(&state)
        .process(files)
        .await;

    tracing::info!(
        total = summary.total,
        success = summary.success,
        failed = summary.failed,
        "Texture batch processed"
    );

    Ok(envelope_response(StatusCode::OK, &ApiEnvelope::from(summary)))
}

/// Fallback for every method except POST on the textures route
pub async fn method_not_allowed() -> HttpAppError {
    AppError::MethodNotAllowed(METHOD_NOT_ALLOWED_MESSAGE.to_string()).into()
}
