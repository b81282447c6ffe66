//! Batch orchestrator
//!
//! Runs every uploaded file through validation and, when it passes, the
//! persist saga. Files are handled strictly one after another in request
//! order; a failing file never stops the ones after it.

use skinvault_core::models::{BatchSummary, ProcessingResult, UploadedFile};
use skinvault_processing::TextureValidator;

use super::saga::PersistCoordinator;
use crate::state::AppState;

pub struct TextureBatchService {
    validator: TextureValidator,
    coordinator: PersistCoordinator,
}

impl TextureBatchService {
    pub fn new(validator: TextureValidator, coordinator: PersistCoordinator) -> Self {
        Self {
            validator,
            coordinator,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.validator.clone(),
            PersistCoordinator::new(
                state.blob_store.clone(),
                state.repository.clone(),
                state.config.uploader_id,
            ),
        )
    }

    pub async fn process(&self, files: Vec<UploadedFile>) -> BatchSummary {
        let mut results = Vec::with_capacity(files.len());

        for file in files {
            results.push(self.process_one(file).await);
        }

        BatchSummary::from_results(results)
    }

    async fn process_one(&self, file: UploadedFile) -> ProcessingResult {
        let validated = match self.validator.validate(&file) {
            Ok(validated) => validated,
            Err(e) => {
                tracing::info!(filename = %file.filename, error = %e, "Texture rejected");
                return ProcessingResult::failed(file.filename, e.to_string());
            }
        };

        match self.coordinator.persist(validated).await {
            Ok(committed) => ProcessingResult::stored(committed.filename, &committed.record),
            Err(e) => {
                tracing::info!(
                    filename = %file.filename,
                    error = %e,
                    kind = e.kind(),
                    "Texture not stored"
                );
                ProcessingResult::failed(file.filename, e.to_string())
            }
        }
    }
}
