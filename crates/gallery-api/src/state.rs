//! Application state shared by all handlers.
//!
//! Built once at startup from the configuration; nothing here is global.

use gallery_db::MetadataStore;
use gallery_services::{IngestionPipeline, PublicationWorkflow, QueryService};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub ingestion: IngestionPipeline,
    pub publication: PublicationWorkflow,
    pub query: QueryService,
    /// Used directly only by readiness checks.
    pub metadata: Arc<dyn MetadataStore>,
    pub readiness_timeout: Duration,
}
