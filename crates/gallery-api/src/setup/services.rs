//! Service initialization

use crate::state::AppState;
use gallery_core::Config;
use gallery_db::MetadataStore;
use gallery_processing::{ImageProcessor, SizePolicy, ThumbnailDeriver};
use gallery_services::{IngestionPipeline, PublicationWorkflow, QueryService};
use gallery_storage::ArtifactStore;
use std::sync::Arc;

/// Build the services over the two stores and bundle them into the state.
pub fn initialize_services(
    config: &Config,
    metadata: Arc<dyn MetadataStore>,
    artifacts: Arc<dyn ArtifactStore>,
) -> Arc<AppState> {
    let processor = ImageProcessor::new(
        SizePolicy::from_config(config),
        ThumbnailDeriver::new(config.thumbnail_width, config.thumbnail_height),
    );

    tracing::info!(
        min_width = config.min_width,
        min_height = config.min_height,
        max_width = ?config.max_width,
        max_height = ?config.max_height,
        thumbnail_width = config.thumbnail_width,
        thumbnail_height = config.thumbnail_height,
        "Ingestion policy configured"
    );

    Arc::new(AppState {
        ingestion: IngestionPipeline::new(artifacts.clone(), metadata.clone(), processor),
        publication: PublicationWorkflow::new(metadata.clone(), artifacts),
        query: QueryService::new(metadata.clone()),
        metadata,
        readiness_timeout: config.store_operation_timeout,
    })
}
