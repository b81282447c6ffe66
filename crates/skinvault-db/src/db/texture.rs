//! Texture repository: lookups and inserts for the textures table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skinvault_core::models::{NewTexture, TextureRecord, Variant};
use skinvault_core::ContentHash;
use sqlx::{PgPool, Postgres};
use thiserror::Error;

/// Texture repository errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A record with this content hash already exists (unique index on `hash`)
    #[error("Texture with hash {0} already exists")]
    DuplicateHash(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid texture row: {0}")]
    InvalidRow(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Database(err)
    }
}

/// Persistence for texture metadata
///
/// `insert` must report a hash collision as [`RepositoryError::DuplicateHash`];
/// the upload pipeline relies on that to tell a lost race from a real failure.
#[async_trait]
pub trait TextureRepository: Send + Sync {
    /// Cheap round trip proving the store is reachable
    async fn ping(&self) -> Result<(), RepositoryError>;

    async fn find_by_hash(
        &self,
        hash: &ContentHash,
    ) -> Result<Option<TextureRecord>, RepositoryError>;

    async fn insert(&self, texture: NewTexture) -> Result<TextureRecord, RepositoryError>;
}

/// Row type for textures table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct TextureRow {
    pub id: i64,
    pub name: String,
    pub variant: String,
    pub hash: String,
    pub size_kb: i32,
    pub uploader_id: i64,
    pub is_public: bool,
    pub uploaded_at: DateTime<Utc>,
    pub likes: i32,
}

impl TextureRow {
    pub fn to_texture_record(self) -> Result<TextureRecord, RepositoryError> {
        let variant: Variant = self
            .variant
            .parse()
            .map_err(|_| RepositoryError::InvalidRow(format!("unknown variant '{}'", self.variant)))?;
        let hash = ContentHash::parse(self.hash.trim())
            .ok_or_else(|| RepositoryError::InvalidRow(format!("malformed hash '{}'", self.hash)))?;

        Ok(TextureRecord {
            id: self.id,
            name: self.name,
            variant,
            hash,
            size_kb: self.size_kb,
            uploader_id: self.uploader_id,
            is_public: self.is_public,
            uploaded_at: self.uploaded_at,
            likes: self.likes,
        })
    }
}

const TEXTURE_COLUMNS: &str =
    "id, name, variant, hash, size_kb, uploader_id, is_public, uploaded_at, likes";

/// PostgreSQL texture repository
#[derive(Clone)]
pub struct PgTextureRepository {
    pool: PgPool,
}

impl PgTextureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TextureRepository for PgTextureRepository {
    #[tracing::instrument(skip(self), fields(db.operation = "ping"))]
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        Ok(())
    }

    #[tracing::instrument(skip(self, hash), fields(db.table = "textures", db.operation = "select", hash = %hash))]
    async fn find_by_hash(
        &self,
        hash: &ContentHash,
    ) -> Result<Option<TextureRecord>, RepositoryError> {
        let row = sqlx::query_as::<Postgres, TextureRow>(&format!(
            "SELECT {} FROM textures WHERE hash = $1",
            TEXTURE_COLUMNS
        ))
        .bind(hash.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TextureRow::to_texture_record).transpose()
    }

    #[tracing::instrument(skip(self, texture), fields(db.table = "textures", db.operation = "insert", hash = %texture.hash))]
    async fn insert(&self, texture: NewTexture) -> Result<TextureRecord, RepositoryError> {
        let result = sqlx::query_as::<Postgres, TextureRow>(&format!(
            r#"
            INSERT INTO textures (name, variant, hash, size_kb, uploader_id, is_public, uploaded_at, likes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0)
            RETURNING {}
            "#,
            TEXTURE_COLUMNS
        ))
        .bind(&texture.name)
        .bind(texture.variant.as_str())
        .bind(texture.hash.as_str())
        .bind(texture.size_kb)
        .bind(texture.uploader_id)
        .bind(texture.is_public)
        .bind(texture.uploaded_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row.to_texture_record(),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::debug!(hash = %texture.hash, "Insert hit unique hash index");
                Err(RepositoryError::DuplicateHash(texture.hash.into_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(variant: &str, hash: &str) -> TextureRow {
        TextureRow {
            id: 7,
            name: "grass".to_string(),
            variant: variant.to_string(),
            hash: hash.to_string(),
            size_kb: 3,
            uploader_id: 1,
            is_public: true,
            uploaded_at: Utc::now(),
            likes: 0,
        }
    }

    #[test]
    fn test_row_to_record() {
        let hash = ContentHash::of(b"grass");
        let record = row("alex", hash.as_str()).to_texture_record().unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.variant, Variant::Alex);
        assert_eq!(record.hash, hash);
    }

    #[test]
    fn test_row_with_unknown_variant_is_rejected() {
        let hash = ContentHash::of(b"grass");
        assert!(matches!(
            row("herobrine", hash.as_str()).to_texture_record(),
            Err(RepositoryError::InvalidRow(_))
        ));
    }

    #[test]
    fn test_row_with_malformed_hash_is_rejected() {
        assert!(matches!(
            row("steve", "not-a-hash").to_texture_record(),
            Err(RepositoryError::InvalidRow(_))
        ));
    }
}
