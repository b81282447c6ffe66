//! Skinvault Database Library
//!
//! Texture metadata persistence: the `TextureRepository` trait, its
//! PostgreSQL implementation and an in-memory implementation for tests.

pub mod db;

pub use db::{PgTextureRepository, RepositoryError, TextureRepository};

#[cfg(any(test, feature = "test-helpers"))]
pub use db::InMemoryTextureRepository;
