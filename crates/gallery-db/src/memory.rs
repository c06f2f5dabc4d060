use async_trait::async_trait;
use chrono::Utc;
use gallery_core::{AppError, ImageId, ImageRecord, ListFilter, PublishOutcome};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::store::MetadataStore;

/// Process-local metadata store. Records do not survive a restart.
#[derive(Clone, Default)]
pub struct InMemoryMetadataStore {
    records: Arc<RwLock<HashMap<ImageId, ImageRecord>>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> AppError {
    AppError::Internal("In-memory metadata store lock poisoned".to_string())
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn insert(&self, record: &ImageRecord) -> Result<ImageRecord, AppError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        if records.contains_key(&record.id) || records.values().any(|r| r.filename == record.filename) {
            return Err(AppError::Internal(format!(
                "Image record {} already exists",
                record.id
            )));
        }
        records.insert(record.id, record.clone());
        tracing::debug!(image_id = %record.id, "Image record stored in memory");
        Ok(record.clone())
    }

    async fn get(&self, id: ImageId) -> Result<Option<ImageRecord>, AppError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(&id).cloned())
    }

    async fn mark_published(&self, id: ImageId) -> Result<PublishOutcome, AppError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Image {} not found", id)))?;

        if record.published {
            return Ok(PublishOutcome::AlreadyPublished);
        }
        record.published = true;
        record.updated_at = Utc::now();
        Ok(PublishOutcome::Published)
    }

    async fn list_filenames(&self, filter: ListFilter) -> Result<Vec<String>, AppError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        let mut matching: Vec<&ImageRecord> = records.values().filter(|r| filter.matches(r)).collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matching.into_iter().map(|r| r.filename.clone()).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.records.read().map(|_| ()).map_err(|_| poisoned())
    }
}
