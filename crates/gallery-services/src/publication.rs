//! The unpublished -> published transition.

use gallery_core::{validate_record, AppError, ImageId, PublishOutcome};
use gallery_db::MetadataStore;
use gallery_storage::ArtifactStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct PublicationWorkflow {
    metadata: Arc<dyn MetadataStore>,
    artifacts: Arc<dyn ArtifactStore>,
}

impl PublicationWorkflow {
    pub fn new(metadata: Arc<dyn MetadataStore>, artifacts: Arc<dyn ArtifactStore>) -> Self {
        Self {
            metadata,
            artifacts,
        }
    }

    /// Publish the record with `id`.
    ///
    /// The record is re-validated and its full-resolution artifact must be
    /// present; otherwise it stays unpublished. Publishing twice is not an
    /// error: the second call reports `AlreadyPublished`.
    #[tracing::instrument(skip(self), fields(image_id = %id))]
    pub async fn publish(&self, id: ImageId) -> Result<PublishOutcome, AppError> {
        let record = self
            .metadata
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Image {} not found", id)))?;

        if let Err(errors) = validate_record(&record) {
            tracing::warn!(violations = %errors, "Stored record failed re-validation, not publishing");
            return Err(errors.into());
        }

        if record.published {
            return Ok(PublishOutcome::AlreadyPublished);
        }

        if !self.artifacts.exists(&record.filename).await? {
            tracing::error!(filename = %record.filename, "Record has no artifact, not publishing");
            return Err(AppError::Internal(format!(
                "Artifact {} missing for image {}",
                record.filename, id
            )));
        }

        let outcome = self.metadata.mark_published(id).await?;
        tracing::info!(outcome = ?outcome, "Image published");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ada, png, FailOn, FailingMetadataStore};
    use crate::IngestionPipeline;
    use gallery_core::{ImageRecord, ListFilter};
    use gallery_db::InMemoryMetadataStore;
    use gallery_processing::ImageProcessor;
    use gallery_storage::LocalArtifactStore;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        _dir: TempDir,
        artifacts: Arc<LocalArtifactStore>,
        metadata: InMemoryMetadataStore,
        workflow: PublicationWorkflow,
        pipeline: IngestionPipeline,
    }

    async fn fixture() -> Fixture {
        let dir = tempdir().unwrap();
        let artifacts = Arc::new(LocalArtifactStore::new(dir.path()).await.unwrap());
        let metadata = InMemoryMetadataStore::new();
        let workflow = PublicationWorkflow::new(Arc::new(metadata.clone()), artifacts.clone());
        let pipeline = IngestionPipeline::new(
            artifacts.clone(),
            Arc::new(metadata.clone()),
            ImageProcessor::default(),
        );
        Fixture {
            _dir: dir,
            artifacts,
            metadata,
            workflow,
            pipeline,
        }
    }

    #[tokio::test]
    async fn test_publish_then_republish() {
        let f = fixture().await;
        let record = f.pipeline.ingest(ada(), Some(png(600, 600))).await.unwrap();

        assert_eq!(f.workflow.publish(record.id).await.unwrap(), PublishOutcome::Published);
        assert_eq!(
            f.workflow.publish(record.id).await.unwrap(),
            PublishOutcome::AlreadyPublished
        );
        assert!(f.metadata.get(record.id).await.unwrap().unwrap().published);
    }

    #[tokio::test]
    async fn test_publish_unknown_id() {
        let f = fixture().await;
        let err = f.workflow.publish(uuid::Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_stored_record_stays_unpublished() {
        let f = fixture().await;
        let mut record = ImageRecord::candidate(ada()).with_dimensions(600, 600);
        record.submitter.zip = "ABCDE".to_string();
        f.metadata.insert(&record).await.unwrap();
        f.artifacts.write(&record.filename, png(600, 600)).await.unwrap();

        let err = f.workflow.publish(record.id).await.unwrap_err();
        assert!(err.is_validation());
        assert!(!f.metadata.get(record.id).await.unwrap().unwrap().published);
    }

    #[tokio::test]
    async fn test_record_without_artifact_stays_unpublished() {
        let f = fixture().await;
        let record = ImageRecord::candidate(ada()).with_dimensions(600, 600);
        f.metadata.insert(&record).await.unwrap();

        let err = f.workflow.publish(record.id).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(f
            .metadata
            .list_filenames(ListFilter::PublishedOnly)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_publish_converges() {
        let f = fixture().await;
        let record = f.pipeline.ingest(ada(), Some(png(480, 480))).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let workflow = f.workflow.clone();
                tokio::spawn(async move { workflow.publish(record.id).await })
            })
            .collect();

        let mut published = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() == PublishOutcome::Published {
                published += 1;
            }
        }
        assert_eq!(published, 1);
        assert!(f.metadata.get(record.id).await.unwrap().unwrap().published);
    }

    #[tokio::test]
    async fn test_store_unavailable_surfaces() {
        let dir = tempdir().unwrap();
        let artifacts = Arc::new(LocalArtifactStore::new(dir.path()).await.unwrap());
        let workflow =
            PublicationWorkflow::new(FailingMetadataStore::new(FailOn::Everything), artifacts);

        let err = workflow.publish(uuid::Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }
}
