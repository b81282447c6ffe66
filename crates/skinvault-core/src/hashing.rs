//! Content hashing for texture blobs.
//!
//! The digest is the dedup key and the on-disk blob name, so it depends on the
//! bytes only, never on the filename or any client metadata.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const CONTENT_HASH_HEX_LEN: usize = 64;

/// Lowercase hex SHA-256 digest of a texture's bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Hash the given bytes.
    pub fn of(data: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(data)))
    }

    /// Parse an existing digest, e.g. one read back from the database.
    ///
    /// Accepts exactly 64 hex characters in either case; the stored form is lowercase.
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() != CONTENT_HASH_HEX_LEN || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
