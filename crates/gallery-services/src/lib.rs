//! Gallery Services Layer
//!
//! Orchestration on top of the storage, processing and metadata crates:
//! ingesting uploads, publishing records and answering listings. Re-exports
//! the pieces the API crate wires together so it depends on a single facade.

pub mod ingestion;
pub mod publication;
pub mod query;

#[cfg(test)]
pub(crate) mod test_support;

pub use gallery_db::{InMemoryMetadataStore, MetadataStore, PgImageRecordRepository};
pub use gallery_processing::{ImageProcessor, SizePolicy, ThumbnailDeriver};
pub use gallery_storage::{
    create_artifact_store, ArtifactStore, LocalArtifactStore, StorageError, StorageResult,
};
pub use ingestion::IngestionPipeline;
pub use publication::PublicationWorkflow;
pub use query::QueryService;
