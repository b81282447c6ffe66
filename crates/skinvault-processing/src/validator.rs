use bytes::Bytes;
use skinvault_core::models::{ParsedName, UploadedFile};
use skinvault_core::{file_extension, parse_texture_filename};

const REQUIRED_EXTENSION: &str = "png";
const REQUIRED_MIME: &str = "image/png";

/// Reasons a single uploaded file is rejected before it touches storage.
///
/// The `Display` text is what the client sees in the per-file result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File upload failed: {0}")]
    Transport(String),

    #[error("File exceeds the size limit ({})", format_size_limit(.max))]
    FileTooLarge { size: usize, max: usize },

    #[error("Only PNG image files are supported")]
    UnsupportedExtension(String),

    #[error("File is not a valid PNG image")]
    InvalidContent { detected: String },

    #[error("Invalid filename format, expected: name_alex.png or name_steve.png")]
    InvalidFilename(String),
}

const KIB: usize = 1024;
const MIB: usize = 1024 * 1024;

/// Human-readable size limit: whole megabytes when exact, otherwise the
/// largest unit that keeps the value non-zero.
fn format_size_limit(max: &usize) -> String {
    let max = *max;
    if max >= MIB && max % MIB == 0 {
        format!("{}MB", max / MIB)
    } else if max >= MIB {
        format!("{:.1}MB", max as f64 / MIB as f64)
    } else if max >= KIB && max % KIB == 0 {
        format!("{}KB", max / KIB)
    } else if max >= KIB {
        format!("{:.1}KB", max as f64 / KIB as f64)
    } else {
        format!("{max} bytes")
    }
}

/// A file that passed every check, ready for the persist step.
#[derive(Debug, Clone)]
pub struct ValidatedTexture {
    pub filename: String,
    pub data: Bytes,
    pub parsed: ParsedName,
}

impl ValidatedTexture {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// MIME type sniffed from the leading magic bytes, ignoring anything the client declared.
pub fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    image::guess_format(data)
        .ok()
        .map(|format| format.to_mime_type())
}

/// Texture upload validator
///
/// Checks run in a fixed order and stop at the first failure, so a file that
/// is both too large and misnamed reports the size problem.
#[derive(Debug, Clone)]
pub struct TextureValidator {
    max_file_size: usize,
}

impl TextureValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn validate(&self, file: &UploadedFile) -> Result<ValidatedTexture, ValidationError> {
        if let Some(error) = &file.transport_error {
            return Err(ValidationError::Transport(error.clone()));
        }

        self.validate_file_size(file.size)?;
        self.validate_extension(&file.filename)?;
        self.validate_content(&file.data)?;

        let parsed = parse_texture_filename(&file.filename)
            .ok_or_else(|| ValidationError::InvalidFilename(file.filename.clone()))?;

        tracing::debug!(
            filename = %file.filename,
            name = %parsed.name,
            variant = %parsed.variant,
            size_bytes = file.size,
            "Texture passed validation"
        );

        Ok(ValidatedTexture {
            filename: file.filename.clone(),
            data: file.data.clone(),
            parsed,
        })
    }

    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = file_extension(filename);
        if extension != REQUIRED_EXTENSION {
            return Err(ValidationError::UnsupportedExtension(extension));
        }
        Ok(())
    }

    pub fn validate_content(&self, data: &[u8]) -> Result<(), ValidationError> {
        match sniff_mime(data) {
            Some(REQUIRED_MIME) => Ok(()),
            Some(other) => Err(ValidationError::InvalidContent {
                detected: other.to_string(),
            }),
            None => Err(ValidationError::InvalidContent {
                detected: "unknown".to_string(),
            }),
        }
    }
}

impl Default for TextureValidator {
    fn default() -> Self {
        Self::new(5 * 1024 * 1024)
    }
}
