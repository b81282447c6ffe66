//! Blob store abstraction
//!
//! This module defines the BlobStore trait the upload pipeline writes through.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use skinvault_core::ContentHash;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Storage directory {path} is not writable (permissions {mode})")]
    NotWritable { path: String, mode: String },

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Content-addressed blob store
///
/// Blobs are keyed by [`ContentHash`] only. A hash always names the same
/// bytes, so `put` may overwrite an existing blob without changing it.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Root directory holding every blob
    fn root(&self) -> &Path;

    /// Filesystem location of the blob for `hash` (whether or not it exists)
    fn blob_path(&self, hash: &ContentHash) -> PathBuf;

    /// Create the root directory if it does not exist yet
    async fn ensure_root(&self) -> StorageResult<()>;

    /// Fail with [`StorageError::NotWritable`] when blobs cannot be created in the root
    async fn check_writable(&self) -> StorageResult<()>;

    /// Write `data` under `hash` and return the final path
    async fn put(&self, hash: &ContentHash, data: Bytes) -> StorageResult<PathBuf>;

    /// Remove the blob for `hash`; a missing blob is not an error
    async fn delete(&self, hash: &ContentHash) -> StorageResult<()>;

    /// Check if a blob exists
    async fn exists(&self, hash: &ContentHash) -> StorageResult<bool>;
}
