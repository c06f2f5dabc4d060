//! Upload ingestion: validate, decode, check bounds, derive the thumbnail and
//! persist both artifacts before committing the metadata record.

use gallery_core::constants::form_fields;
use gallery_core::{validate_record, validate_submission, AppError, ImageRecord, Submission};
use gallery_db::MetadataStore;
use gallery_processing::ImageProcessor;
use gallery_storage::ArtifactStore;
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates one upload from form fields to committed record.
///
/// Artifacts are always durable before the metadata insert, so a record is
/// never visible without its files. When a later step fails the artifacts
/// already written are deleted on a best-effort basis.
#[derive(Clone)]
pub struct IngestionPipeline {
    artifacts: Arc<dyn ArtifactStore>,
    metadata: Arc<dyn MetadataStore>,
    processor: ImageProcessor,
}

impl IngestionPipeline {
    pub fn new(
        artifacts: Arc<dyn ArtifactStore>,
        metadata: Arc<dyn MetadataStore>,
        processor: ImageProcessor,
    ) -> Self {
        Self {
            artifacts,
            metadata,
            processor,
        }
    }

    /// Ingest one submission. `file` is `None` when the form had no file part.
    #[tracing::instrument(skip_all, fields(image_id))]
    pub async fn ingest(
        &self,
        submission: Submission,
        file: Option<Vec<u8>>,
    ) -> Result<ImageRecord, AppError> {
        let start = Instant::now();
        let submission = submission.normalized();

        // All field rules are reported together, before any decode or I/O.
        let mut errors = validate_submission(&submission).err().unwrap_or_default();
        let file = file.filter(|bytes| !bytes.is_empty());
        if file.is_none() {
            errors.push(form_fields::FILE, "is required");
        }
        errors.into_result()?;
        let file = file.unwrap_or_default();

        let candidate = ImageRecord::candidate(submission);
        tracing::Span::current().record("image_id", tracing::field::display(candidate.id));

        let prepared = self.processor.prepare_blocking(file).await?;
        let record = candidate.with_dimensions(prepared.width, prepared.height);
        validate_record(&record)?;

        let thumbnail_name = record.thumbnail_filename();
        let mut written: Vec<&str> = Vec::with_capacity(2);

        if let Err(e) = self
            .artifacts
            .write(&thumbnail_name, prepared.thumbnail_png)
            .await
        {
            tracing::error!(error = %e, artifact = %thumbnail_name, "Thumbnail write failed");
            return Err(e.into());
        }
        written.push(&thumbnail_name);

        if let Err(e) = self.artifacts.write(&record.filename, prepared.full_png).await {
            tracing::error!(error = %e, artifact = %record.filename, "Full image write failed");
            self.discard(&written).await;
            return Err(e.into());
        }
        written.push(&record.filename);

        let committed = match self.metadata.insert(&record).await {
            Ok(committed) => committed,
            Err(e) => {
                tracing::error!(error = %e, "Metadata insert failed after artifacts were written");
                self.discard(&written).await;
                return Err(e);
            }
        };

        tracing::info!(
            width = committed.width,
            height = committed.height,
            filename = %committed.filename,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Image ingested"
        );

        Ok(committed)
    }

    /// Best-effort removal of artifacts orphaned by a failed ingestion.
    async fn discard(&self, names: &[&str]) {
        for name in names {
            if let Err(e) = self.artifacts.delete(name).await {
                tracing::warn!(error = %e, artifact = %name, "Failed to remove orphaned artifact");
            }
        }
    }
}
