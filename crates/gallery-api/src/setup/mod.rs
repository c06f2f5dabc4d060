//! Application setup and initialization
//!
//! Everything main.rs needs to go from a validated `Config` to a router.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use gallery_core::Config;
use std::sync::Arc;

/// Initialize the entire application, tracing included.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        metadata_backend = ?config.metadata_backend,
        "Configuration loaded and validated successfully"
    );

    build_app(&config).await
}

/// Wire stores, services and routes without touching global tracing state.
pub async fn build_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate()?;

    let metadata = database::setup_metadata_store(config).await?;
    let artifacts = storage::setup_storage(config).await?;

    let state = services::initialize_services(config, metadata, artifacts);

    let router = routes::setup_routes(config, state.clone())?;

    Ok((state, router))
}
