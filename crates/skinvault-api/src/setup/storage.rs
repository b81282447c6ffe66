//! Blob store setup

use std::sync::Arc;

use skinvault_core::Config;
use skinvault_storage::{BlobStore, LocalBlobStore};

/// Create the local blob store and prepare its root directory.
///
/// An unusable directory is only logged here: uploads report it per file, and
/// an operator may fix permissions without restarting the service.
pub async fn setup_storage(config: &Config) -> Arc<dyn BlobStore> {
    let store = LocalBlobStore::new(&config.storage_path);

    let ready = match store.ensure_root().await {
        Ok(()) => store.check_writable().await,
        Err(e) => Err(e),
    };

    match ready {
        Ok(()) => tracing::info!(path = %config.storage_path.display(), "Texture storage ready"),
        Err(e) => tracing::warn!(
            path = %config.storage_path.display(),
            error = %e,
            "Texture storage is not usable, uploads will fail until it is fixed"
        ),
    }

    Arc::new(store)
}
