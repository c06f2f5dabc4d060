use crate::{ArtifactStore, LocalArtifactStore, StorageResult};
use gallery_core::Config;
use std::sync::Arc;

/// Create the artifact store described by configuration
pub async fn create_artifact_store(config: &Config) -> StorageResult<Arc<dyn ArtifactStore>> {
    let store = LocalArtifactStore::new(config.image_dir.clone()).await?;

    tracing::info!(root = %store.root().display(), "Using local artifact store");

    Ok(Arc::new(store))
}
