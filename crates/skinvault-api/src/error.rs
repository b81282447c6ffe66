//! HTTP error response conversion
//!
//! Request-level failures (wrong method, missing files, unreachable database)
//! are rendered as the same JSON envelope a processed batch uses, with
//! `success: false` and `data: null`.
//!
//! **Handler pattern:** return `Result<Response, HttpAppError>` and convert
//! domain errors with `?` / `.map_err(Into::into)`.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use skinvault_core::{ApiEnvelope, AppError, BatchSummary, ErrorMetadata, LogLevel};
use skinvault_db::RepositoryError;

use crate::utils::envelope::envelope_response;

/// Message for requests that carry no texture files
pub const NO_FILES_MESSAGE: &str = "No files uploaded, use the field name \"images\"";

/// Message for requests using anything but POST
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Only POST requests are supported";

/// Message for requests arriving while the database is unreachable
pub const DATABASE_UNAVAILABLE_MESSAGE: &str = "Database connection failed";

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from skinvault-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// A body that is not multipart/form-data at all carries no files.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Request is not multipart");
        HttpAppError(AppError::BadRequest(NO_FILES_MESSAGE.to_string()))
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        let app = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(format!("Request body too large: {}", err.body_text()))
        } else {
            AppError::BadRequest(format!("Failed to read multipart body: {}", err.body_text()))
        };
        HttpAppError(app)
    }
}

impl From<RepositoryError> for HttpAppError {
    fn from(err: RepositoryError) -> Self {
        let app = match err {
            RepositoryError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Database unavailable");
                AppError::ServiceUnavailable(DATABASE_UNAVAILABLE_MESSAGE.to_string())
            }
            RepositoryError::Database(e) => AppError::Database(e),
            other => AppError::Internal(other.to_string()),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %error.detailed_message(), error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let envelope: ApiEnvelope<BatchSummary> = ApiEnvelope::failure(app_error.client_message());
        envelope_response(status, &envelope)
    }
}
