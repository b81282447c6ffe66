//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use skinvault_core::Config;
use skinvault_db::PgTextureRepository;

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let blob_store = storage::setup_storage(&config).await;

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(PgTextureRepository::new(pool)),
        blob_store,
    ));

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
