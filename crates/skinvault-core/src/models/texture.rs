use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::hashing::ContentHash;

/// Player model variant a texture is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Alex,
    Steve,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Alex => "alex",
            Variant::Steve => "steve",
        }
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alex" => Ok(Variant::Alex),
            "steve" => Ok(Variant::Steve),
            _ => Err(anyhow::anyhow!("Invalid texture variant: {}", s)),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical name and variant extracted from an uploaded filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub name: String,
    pub variant: Variant,
}

/// Persisted texture metadata (one row of the `textures` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureRecord {
    pub id: i64,
    pub name: String,
    pub variant: Variant,
    pub hash: ContentHash,
    pub size_kb: i32,
    pub uploader_id: i64,
    pub is_public: bool,
    pub uploaded_at: DateTime<Utc>,
    pub likes: i32,
}

/// Values for a texture row that has not been inserted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTexture {
    pub name: String,
    pub variant: Variant,
    pub hash: ContentHash,
    pub size_kb: i32,
    pub uploader_id: i64,
    pub is_public: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl NewTexture {
    /// Build the row that accompanies a freshly stored blob.
    ///
    /// Uploaded textures are public and start with zero likes.
    pub fn for_upload(
        parsed: ParsedName,
        hash: ContentHash,
        size_kb: i32,
        uploader_id: i64,
    ) -> Self {
        Self {
            name: parsed.name,
            variant: parsed.variant,
            hash,
            size_kb,
            uploader_id,
            is_public: true,
            uploaded_at: Utc::now(),
        }
    }
}

/// Whole kilobytes, rounded down, never less than 1.
pub fn size_in_kb(len: usize) -> i32 {
    let kb = (len / 1024).max(1);
    i32::try_from(kb).unwrap_or(i32::MAX)
}
