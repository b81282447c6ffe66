//! Multipart extraction
//!
//! Turns the `images` form field (single file, repeated field, or the
//! bracketed `images[]` form) into an ordered list of [`UploadedFile`].

use axum::extract::Multipart;
use skinvault_core::models::UploadedFile;
use skinvault_core::AppError;

use crate::constants::{IMAGES_FIELD, IMAGES_FIELD_MULTI};
use crate::error::{HttpAppError, NO_FILES_MESSAGE};

/// Sent by browsers for a file input left empty
const NO_FILE_SELECTED: &str = "no file was selected";

pub fn is_images_field(name: Option<&str>) -> bool {
    matches!(name, Some(IMAGES_FIELD) | Some(IMAGES_FIELD_MULTI))
}

/// Read every file under the `images` field, in the order received.
///
/// Other fields, and `images` parts without a filename, are skipped. When a
/// file body fails mid-read it is recorded with the transport error and
/// reading stops, since the rest of the stream is unusable.
pub async fn collect_uploaded_files(
    mut multipart: Multipart,
) -> Result<Vec<UploadedFile>, HttpAppError> {
    let mut files = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if files.is_empty() => return Err(e.into()),
            Err(e) => {
                tracing::warn!(
                    error = %e.body_text(),
                    received = files.len(),
                    "Multipart stream ended early"
                );
                break;
            }
        };

        if !is_images_field(field.name()) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            tracing::debug!("Ignoring images part without a filename");
            continue;
        };

        match field.bytes().await {
            Ok(data) if filename.is_empty() && data.is_empty() => {
                files.push(UploadedFile::failed(filename, NO_FILE_SELECTED));
            }
            Ok(data) => files.push(UploadedFile::received(filename, data)),
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e.body_text(), "Failed to read upload");
                files.push(UploadedFile::failed(filename, e.body_text()));
                break;
            }
        }
    }

    if files.is_empty() {
        return Err(AppError::BadRequest(NO_FILES_MESSAGE.to_string()).into());
    }

    Ok(files)
}
