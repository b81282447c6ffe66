use crate::traits::{BlobStore, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use skinvault_core::ContentHash;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

#[cfg(unix)]
const ROOT_DIR_MODE: u32 = 0o755;

/// Local filesystem blob store
#[derive(Clone, Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore
    ///
    /// The directory is not touched here; call [`BlobStore::ensure_root`]
    /// before the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scratch file next to the final blob so the rename stays on one filesystem.
    fn temp_path(&self, hash: &ContentHash) -> PathBuf {
        self.root
            .join(format!(".{}.{}.tmp", hash.as_str(), Uuid::new_v4().simple()))
    }

    async fn write_temp(&self, path: &Path, data: &[u8]) -> StorageResult<()> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &std::fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:04o}", metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn permission_bits(metadata: &std::fs::Metadata) -> String {
    if metadata.permissions().readonly() {
        "readonly".to_string()
    } else {
        "unknown".to_string()
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, hash: &ContentHash) -> PathBuf {
        self.root.join(hash.as_str())
    }

    async fn ensure_root(&self) -> StorageResult<()> {
        if fs::try_exists(&self.root).await.unwrap_or(false) {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(ROOT_DIR_MODE);

        builder.create(&self.root).await.map_err(|e| {
            StorageError::DirectoryUnavailable(format!(
                "Failed to create storage directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        tracing::info!(path = %self.root.display(), "Created texture storage directory");
        Ok(())
    }

    async fn check_writable(&self) -> StorageResult<()> {
        let metadata = fs::metadata(&self.root).await.map_err(|e| {
            StorageError::DirectoryUnavailable(format!(
                "Failed to read storage directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        if !metadata.is_dir() {
            return Err(StorageError::DirectoryUnavailable(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let not_writable = || StorageError::NotWritable {
            path: self.root.display().to_string(),
            mode: permission_bits(&metadata),
        };

        if metadata.permissions().readonly() {
            return Err(not_writable());
        }

        let marker = self.root.join(format!(".write-check.{}", Uuid::new_v4().simple()));
        if fs::File::create(&marker).await.is_err() {
            return Err(not_writable());
        }
        if let Err(e) = fs::remove_file(&marker).await {
            tracing::warn!(path = %marker.display(), error = %e, "Failed to remove write-check marker");
        }

        Ok(())
    }

    async fn put(&self, hash: &ContentHash, data: Bytes) -> StorageResult<PathBuf> {
        let path = self.blob_path(hash);
        let temp = self.temp_path(hash);
        let start = std::time::Instant::now();

        if let Err(e) = self.write_temp(&temp, &data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::WriteFailed(format!(
                "Failed to move file into place at {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            hash = %hash,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local blob write successful"
        );

        Ok(path)
    }

    async fn delete(&self, hash: &ContentHash) -> StorageResult<()> {
        let path = self.blob_path(hash);
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            hash = %hash,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local blob delete successful"
        );

        Ok(())
    }

    async fn exists(&self, hash: &ContentHash) -> StorageResult<bool> {
        Ok(fs::try_exists(self.blob_path(hash)).await?)
    }
}
