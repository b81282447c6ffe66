//! Configuration module
//!
//! Runtime settings for the texture upload service. Everything that used to be
//! a compiled-in constant (uploader identity, storage root, size ceiling,
//! database credentials) is read from the environment once at startup.

use std::env;
use std::path::PathBuf;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

// Common constants
const DEFAULT_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STORAGE_PATH: &str = "./storage/textures";
const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_MAX_REQUEST_BODY_BYTES: usize = 64 * 1024 * 1024;
const DEFAULT_UPLOADER_ID: i64 = 1;

/// Database connection settings
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub timeout_seconds: u64,
    pub run_migrations: bool,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub database: DatabaseSettings,
    /// Root directory of the content-addressed blob store
    pub storage_path: PathBuf,
    /// Per-file size ceiling enforced by the validator
    pub max_file_size_bytes: usize,
    /// Whole-request body limit applied at the HTTP layer
    pub max_request_body_bytes: usize,
    /// Identity recorded as the uploader of every texture
    pub uploader_id: i64,
}

impl Config {
    /// Load configuration from the process environment (and `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_port = match var("PORT") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = var("DB_HOST").ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL or DB_HOST must be set")
                })?;
                let port = var("DB_PORT").unwrap_or_else(|| "5432".to_string());
                let user = var("DB_USER")
                    .ok_or_else(|| anyhow::anyhow!("DB_USER must be set when DB_HOST is used"))?;
                let password = var("DB_PASSWORD").unwrap_or_default();
                let name = var("DB_NAME")
                    .ok_or_else(|| anyhow::anyhow!("DB_NAME must be set when DB_HOST is used"))?;
                let user = utf8_percent_encode(&user, NON_ALPHANUMERIC);
                let password = utf8_percent_encode(&password, NON_ALPHANUMERIC);
                let name = utf8_percent_encode(&name, NON_ALPHANUMERIC);
                format!("postgresql://{user}:{password}@{host}:{port}/{name}")
            }
        };

        let database = DatabaseSettings {
            url: database_url,
            max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            timeout_seconds: parse_or(&var, "DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
            run_migrations: var("RUN_MIGRATIONS")
                .map(|v| v.to_lowercase())
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        };

        Ok(Self {
            server_port,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            database,
            storage_path: var("TEXTURE_STORAGE_PATH")
                .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string())
                .into(),
            max_file_size_bytes: parse_or(
                &var,
                "MAX_FILE_SIZE_BYTES",
                DEFAULT_MAX_FILE_SIZE_BYTES,
            )?,
            max_request_body_bytes: parse_or(
                &var,
                "MAX_REQUEST_BODY_BYTES",
                DEFAULT_MAX_REQUEST_BODY_BYTES,
            )?,
            uploader_id: parse_or(&var, "UPLOADER_ID", DEFAULT_UPLOADER_ID)?,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database.url.starts_with("postgres://")
            && !self.database.url.starts_with("postgresql://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be greater than 0"));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_BYTES must be greater than 0"));
        }

        if self.max_request_body_bytes < self.max_file_size_bytes {
            return Err(anyhow::anyhow!(
                "MAX_REQUEST_BODY_BYTES must be at least MAX_FILE_SIZE_BYTES"
            ));
        }

        if self.storage_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("TEXTURE_STORAGE_PATH must not be empty"));
        }

        Ok(())
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", key)),
        None => Ok(default),
    }
}
