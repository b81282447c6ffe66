use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::texture::{TextureRecord, Variant};

/// One file from the incoming multipart set, already normalized.
///
/// The transport may deliver a single file or several under the same field;
/// either way the request is turned into an ordered `Vec<UploadedFile>` before
/// validation runs.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client (untrusted)
    pub filename: String,
    /// Size in bytes of the received content
    pub size: usize,
    /// Received content
    pub data: Bytes,
    /// Set when the transport failed to deliver this file
    pub transport_error: Option<String>,
}

impl UploadedFile {
    pub fn received(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            filename: filename.into(),
            size: data.len(),
            data,
            transport_error: None,
        }
    }

    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            size: 0,
            data: Bytes::new(),
            transport_error: Some(error.into()),
        }
    }
}

/// Per-file outcome reported back to the client.
///
/// Failures carry `error`; successes carry the stored record fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcessingResult {
    pub success: bool,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    /// Stored size in whole kilobytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}

impl ProcessingResult {
    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            filename: filename.into(),
            error: Some(error.into()),
            id: None,
            hash: None,
            name: None,
            variant: None,
            size: None,
        }
    }

    pub fn stored(filename: impl Into<String>, record: &TextureRecord) -> Self {
        Self {
            success: true,
            filename: filename.into(),
            error: None,
            id: Some(record.id),
            hash: Some(record.hash.to_string()),
            name: Some(record.name.clone()),
            variant: Some(record.variant),
            size: Some(record.size_kb),
        }
    }
}

/// Aggregated outcome of one upload request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub results: Vec<ProcessingResult>,
}

impl BatchSummary {
    pub fn from_results(results: Vec<ProcessingResult>) -> Self {
        let total = results.len();
        let success = results.iter().filter(|r| r.success).count();
        Self {
            total,
            success,
            failed: total - success,
            results,
        }
    }

    /// A batch counts as successful when at least one file was stored.
    pub fn is_success(&self) -> bool {
        self.success > 0
    }

    pub fn message(&self) -> String {
        format!(
            "Processed {}/{} files successfully",
            self.success, self.total
        )
    }
}
