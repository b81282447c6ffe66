//! Types used by the texture upload service

use skinvault_db::RepositoryError;
use skinvault_storage::StorageError;
use thiserror::Error;

/// Reasons a validated texture could not be persisted.
///
/// The `Display` text is the per-file error the client sees; none of these
/// abort the rest of the batch.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Could not create upload directory: {path} - {reason}")]
    Directory { path: String, reason: String },

    #[error("Upload directory is not writable: {path} - current permissions: {mode}")]
    Permission { path: String, mode: String },

    #[error("Identical file already exists")]
    DuplicateContent { hash: String },

    #[error("Failed to save file")]
    Save(#[source] StorageError),

    #[error("Database error: {0}")]
    Database(String),
}

impl PersistError {
    /// Map a failure while preparing the storage root.
    pub(crate) fn from_directory(path: &std::path::Path, err: StorageError) -> Self {
        let path = path.display().to_string();
        match err {
            StorageError::NotWritable { path, mode } => PersistError::Permission { path, mode },
            StorageError::DirectoryUnavailable(reason) => PersistError::Directory { path, reason },
            other => PersistError::Directory {
                path,
                reason: other.to_string(),
            },
        }
    }

    /// Short label for log records
    pub fn kind(&self) -> &'static str {
        match self {
            PersistError::Directory { .. } => "directory",
            PersistError::Permission { .. } => "permission",
            PersistError::DuplicateContent { .. } => "duplicate",
            PersistError::Save(_) => "save",
            PersistError::Database(_) => "database",
        }
    }
}

impl From<RepositoryError> for PersistError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateHash(hash) => PersistError::DuplicateContent { hash },
            RepositoryError::Database(e) => PersistError::Database(e.to_string()),
            other => PersistError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_messages() {
        let err = PersistError::Permission {
            path: "/srv/textures".to_string(),
            mode: "0555".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Upload directory is not writable: /srv/textures - current permissions: 0555"
        );

        let err = PersistError::DuplicateContent {
            hash: "ab".repeat(32),
        };
        assert_eq!(err.to_string(), "Identical file already exists");

        let err = PersistError::Save(StorageError::WriteFailed("disk full".to_string()));
        assert_eq!(err.to_string(), "Failed to save file");
    }

    #[test]
    fn test_directory_errors_keep_the_root_path() {
        let err = PersistError::from_directory(
            Path::new("/srv/textures"),
            StorageError::DirectoryUnavailable("permission denied".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Could not create upload directory: /srv/textures - permission denied"
        );
        assert_eq!(err.kind(), "directory");
    }

    #[test]
    fn test_repository_errors() {
        let err: PersistError = RepositoryError::DuplicateHash("ab".repeat(32)).into();
        assert!(matches!(err, PersistError::DuplicateContent { .. }));

        let err: PersistError = RepositoryError::Unavailable("connection reset".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Database error: Database unavailable: connection reset"
        );
    }
}
