//! Dedup/persist saga for a single texture
//!
//! The blob store and the database share no transaction, so persisting is
//! modelled as explicit stages:
//!
//! ```text
//! Validated ──write_blob──▶ BlobWritten ──commit──▶ Committed
//!                                │
//!                                └──roll_back──▶ RolledBack
//! ```
//!
//! Each transition consumes the previous stage, so a written blob can only
//! end up committed or rolled back.

use std::path::PathBuf;
use std::sync::Arc;

use skinvault_core::models::{size_in_kb, NewTexture, ParsedName, TextureRecord};
use skinvault_core::ContentHash;
use skinvault_db::{RepositoryError, TextureRepository};
use skinvault_processing::ValidatedTexture;
use skinvault_storage::BlobStore;

use super::types::PersistError;

/// A texture that passed validation, with its content hash computed.
#[derive(Debug)]
pub struct Validated {
    texture: ValidatedTexture,
    hash: ContentHash,
}

impl Validated {
    pub fn new(texture: ValidatedTexture) -> Self {
        let hash = ContentHash::of(&texture.data);
        Self { texture, hash }
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    pub fn filename(&self) -> &str {
        &self.texture.filename
    }

    /// Write the bytes under their content hash.
    pub async fn write_blob(self, store: &dyn BlobStore) -> Result<BlobWritten, PersistError> {
        let size_kb = size_in_kb(self.texture.size());
        let ValidatedTexture {
            filename,
            data,
            parsed,
        } = self.texture;

        let path = store
            .put(&self.hash, data)
            .await
            .map_err(PersistError::Save)?;

        Ok(BlobWritten {
            filename,
            parsed,
            hash: self.hash,
            size_kb,
            path,
        })
    }
}

/// The blob is on disk but no record references it yet.
#[derive(Debug)]
pub struct BlobWritten {
    filename: String,
    parsed: ParsedName,
    hash: ContentHash,
    size_kb: i32,
    path: PathBuf,
}

impl BlobWritten {
    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn size_kb(&self) -> i32 {
        self.size_kb
    }

    /// Insert the metadata record.
    ///
    /// On failure the stage is handed back with the error so the caller
    /// decides between keeping and rolling back the blob.
    pub async fn commit(
        self,
        repository: &dyn TextureRepository,
        uploader_id: i64,
    ) -> Result<Committed, (BlobWritten, RepositoryError)> {
        let texture = NewTexture::for_upload(
            self.parsed.clone(),
            self.hash.clone(),
            self.size_kb,
            uploader_id,
        );

        match repository.insert(texture).await {
            Ok(record) => Ok(Committed {
                filename: self.filename,
                record,
            }),
            Err(e) => Err((self, e)),
        }
    }

    /// Compensating action: remove the blob written by this stage.
    ///
    /// Blobs are keyed by content, so a concurrent upload of the same bytes
    /// may have committed a record pointing at this very file. The blob is
    /// only deleted when no record for the hash exists.
    pub async fn roll_back(
        self,
        store: &dyn BlobStore,
        repository: &dyn TextureRepository,
        cause: RepositoryError,
    ) -> RolledBack {
        match repository.find_by_hash(&self.hash).await {
            Ok(Some(owner)) => {
                tracing::warn!(
                    hash = %self.hash,
                    owner_id = owner.id,
                    "Blob is referenced by another upload, keeping it"
                );
                return RolledBack {
                    filename: self.filename,
                    hash: self.hash,
                    cause,
                    blob_removed: false,
                };
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, hash = %self.hash, "Ownership check failed, deleting blob");
            }
        }

        let blob_removed = match store.delete(&self.hash).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    hash = %self.hash,
                    path = %self.path.display(),
                    "Failed to delete blob after database error, blob is orphaned"
                );
                false
            }
        };

        RolledBack {
            filename: self.filename,
            hash: self.hash,
            cause,
            blob_removed,
        }
    }
}

/// Blob and record are both in place.
#[derive(Debug)]
pub struct Committed {
    pub filename: String,
    pub record: TextureRecord,
}

/// The insert failed and the blob was (or could not be) removed again.
#[derive(Debug)]
pub struct RolledBack {
    pub filename: String,
    pub hash: ContentHash,
    pub cause: RepositoryError,
    pub blob_removed: bool,
}

impl From<RolledBack> for PersistError {
    fn from(rolled_back: RolledBack) -> Self {
        PersistError::Database(rolled_back.cause.to_string())
    }
}

/// Runs the saga for one validated texture at a time.
#[derive(Clone)]
pub struct PersistCoordinator {
    blob_store: Arc<dyn BlobStore>,
    repository: Arc<dyn TextureRepository>,
    uploader_id: i64,
}

impl PersistCoordinator {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        repository: Arc<dyn TextureRepository>,
        uploader_id: i64,
    ) -> Self {
        Self {
            blob_store,
            repository,
            uploader_id,
        }
    }

    #[tracing::instrument(skip(self, texture), fields(filename = %texture.filename))]
    pub async fn persist(&self, texture: ValidatedTexture) -> Result<Committed, PersistError> {
        let validated = Validated::new(texture);

        self.prepare_directory().await?;

        if let Some(existing) = self.repository.find_by_hash(validated.hash()).await? {
            tracing::debug!(
                hash = %validated.hash(),
                existing_id = existing.id,
                "Identical texture already stored"
            );
            return Err(PersistError::DuplicateContent {
                hash: validated.hash().to_string(),
            });
        }

        let written = validated.write_blob(self.blob_store.as_ref()).await?;

        match written
            .commit(self.repository.as_ref(), self.uploader_id)
            .await
        {
            Ok(committed) => {
                tracing::info!(
                    id = committed.record.id,
                    hash = %committed.record.hash,
                    size_kb = committed.record.size_kb,
                    "Texture stored"
                );
                Ok(committed)
            }
            // A concurrent upload committed the same hash first. The blob is
            // byte-identical and belongs to that record now.
            Err((written, RepositoryError::DuplicateHash(hash))) => {
                tracing::warn!(hash = %written.hash(), "Lost insert race to identical upload");
                Err(PersistError::DuplicateContent { hash })
            }
            Err((written, err)) => {
                tracing::warn!(hash = %written.hash(), error = %err, "Insert failed, rolling back blob");
                let rolled_back = written
                    .roll_back(self.blob_store.as_ref(), self.repository.as_ref(), err)
                    .await;
                Err(rolled_back.into())
            }
        }
    }

    async fn prepare_directory(&self) -> Result<(), PersistError> {
        let root = self.blob_store.root();
        self.blob_store
            .ensure_root()
            .await
            .map_err(|e| PersistError::from_directory(root, e))?;
        self.blob_store
            .check_writable()
            .await
            .map_err(|e| PersistError::from_directory(root, e))
    }
}
