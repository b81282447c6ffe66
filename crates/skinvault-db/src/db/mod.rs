//! Database repositories for data access layer
//
// Texture metadata (trait, PostgreSQL implementation)
pub mod texture;
//
// In-memory implementation with failure injection
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;

pub use texture::{PgTextureRepository, RepositoryError, TextureRepository};

#[cfg(any(test, feature = "test-helpers"))]
pub use memory::InMemoryTextureRepository;
