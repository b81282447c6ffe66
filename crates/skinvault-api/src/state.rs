//! Application state

use std::sync::Arc;

use skinvault_core::Config;
use skinvault_db::TextureRepository;
use skinvault_processing::TextureValidator;
use skinvault_storage::BlobStore;

/// Shared state handed to every handler
///
/// Built once at startup; the repository and blob store sit behind trait
/// objects so tests can swap in the in-memory repository and a temp dir.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn TextureRepository>,
    pub blob_store: Arc<dyn BlobStore>,
    pub validator: TextureValidator,
}

impl AppState {
    pub fn new(
        config: Config,
        repository: Arc<dyn TextureRepository>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        let validator = TextureValidator::new(config.max_file_size_bytes);
        Self {
            config,
            repository,
            blob_store,
            validator,
        }
    }
}
