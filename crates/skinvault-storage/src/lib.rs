//! Skinvault Storage Library
//!
//! Content-addressed blob storage for texture files.
//!
//! # Blob layout
//!
//! Blobs live in a single flat directory and are named by the lowercase hex
//! SHA-256 of their content, with no extension: `{root}/{hash}`. Because the
//! name is derived from the bytes, writing the same content twice produces the
//! same file and is idempotent.

pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalBlobStore;
pub use traits::{BlobStore, StorageError, StorageResult};
