//! Texture upload pipeline
//!
//! validate → hash → prepare directory → dedup check → write blob → insert record,
//! with the blob deleted again when the insert fails.

pub mod batch;
pub mod saga;
pub mod types;

pub use batch::TextureBatchService;
pub use saga::{BlobWritten, Committed, PersistCoordinator, RolledBack, Validated};
pub use types::PersistError;
