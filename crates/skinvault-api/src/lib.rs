//! Skinvault API
//!
//! HTTP service accepting PNG skin textures, deduplicating them by content
//! hash and recording their metadata in PostgreSQL.

pub mod api_doc;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::HttpAppError;
pub use state::AppState;
