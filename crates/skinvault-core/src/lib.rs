//! Skinvault Core Library
//!
//! This crate provides core domain models, error types, configuration, content
//! hashing and filename parsing shared across all Skinvault components.

pub mod config;
pub mod error;
pub mod filename;
pub mod hashing;
pub mod models;

// Re-export commonly used types
pub use config::{Config, DatabaseSettings};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use filename::{file_extension, parse_texture_filename};
pub use hashing::ContentHash;
pub use models::{
    ApiEnvelope, BatchSummary, NewTexture, ParsedName, ProcessingResult, TextureRecord,
    UploadedFile, Variant,
};
