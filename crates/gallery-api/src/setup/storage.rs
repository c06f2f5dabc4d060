//! Artifact storage setup

use anyhow::{Context, Result};
use gallery_core::Config;
use gallery_storage::{create_artifact_store, ArtifactStore};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn ArtifactStore>> {
    let store = create_artifact_store(config)
        .await
        .with_context(|| format!("Failed to open image directory {}", config.image_dir.display()))?;

    tracing::info!(image_dir = %config.image_dir.display(), "Artifact storage ready");
    Ok(store)
}
