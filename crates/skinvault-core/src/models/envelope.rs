use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::upload::BatchSummary;

/// JSON envelope used for every response of the upload endpoint.
///
/// `data` is always present in the output and is `null` for request-level failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn new(success: bool, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, message, None)
    }
}

impl From<BatchSummary> for ApiEnvelope<BatchSummary> {
    fn from(summary: BatchSummary) -> Self {
        Self::new(summary.is_success(), summary.message(), Some(summary))
    }
}
