use async_trait::async_trait;
use gallery_core::{AppError, ImageId, ImageRecord, ListFilter, PublishOutcome};

/// Mapping from identifier to a validated image record.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert a new record. An existing record with the same id is never
    /// overwritten; the insert fails instead.
    async fn insert(&self, record: &ImageRecord) -> Result<ImageRecord, AppError>;

    async fn get(&self, id: ImageId) -> Result<Option<ImageRecord>, AppError>;

    /// Set `published = true`. Fails with `NotFound` when no record has `id`.
    /// Publishing an already published record succeeds and changes nothing.
    async fn mark_published(&self, id: ImageId) -> Result<PublishOutcome, AppError>;

    /// Filenames of records matching `filter`. Order is unspecified.
    async fn list_filenames(&self, filter: ListFilter) -> Result<Vec<String>, AppError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
