//! In-memory texture repository for testing
//!
//! Behaves like the PostgreSQL repository (ids from 1, unique hashes) and can
//! be told to fail, so callers can exercise their error paths without a database.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use skinvault_core::models::{NewTexture, TextureRecord};
use skinvault_core::ContentHash;

use super::texture::{RepositoryError, TextureRepository};

#[derive(Clone, Default)]
pub struct InMemoryTextureRepository {
    records: Arc<Mutex<Vec<TextureRecord>>>,
    fail_inserts: Arc<AtomicBool>,
    duplicate_on_insert: Arc<AtomicBool>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryTextureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert fail with a database error
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make every insert report a unique-index violation, as if a concurrent
    /// request had committed the same hash after our lookup
    pub fn set_duplicate_on_insert(&self, duplicate: bool) {
        self.duplicate_on_insert.store(duplicate, Ordering::SeqCst);
    }

    /// Make every operation fail as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<TextureRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TextureRepository for InMemoryTextureRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }

    async fn find_by_hash(
        &self,
        hash: &ContentHash,
    ) -> Result<Option<TextureRecord>, RepositoryError> {
        self.check_available()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.hash == hash)
            .cloned())
    }

    async fn insert(&self, texture: NewTexture) -> Result<TextureRecord, RepositoryError> {
        self.check_available()?;

        if self.duplicate_on_insert.load(Ordering::SeqCst) {
            return Err(RepositoryError::DuplicateHash(texture.hash.into_string()));
        }
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::Protocol(
                "injected insert failure".to_string(),
            )));
        }

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.hash == texture.hash) {
            return Err(RepositoryError::DuplicateHash(texture.hash.into_string()));
        }

        let record = TextureRecord {
            id: records.len() as i64 + 1,
            name: texture.name,
            variant: texture.variant,
            hash: texture.hash,
            size_kb: texture.size_kb,
            uploader_id: texture.uploader_id,
            is_public: texture.is_public,
            uploaded_at: texture.uploaded_at,
            likes: 0,
        };
        records.push(record.clone());
        Ok(record)
    }
}
