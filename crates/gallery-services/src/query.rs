//! Anonymous listings. Only filenames ever leave this service.

use gallery_core::{AppError, ListFilter};
use gallery_db::MetadataStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct QueryService {
    metadata: Arc<dyn MetadataStore>,
}

impl QueryService {
    pub fn new(metadata: Arc<dyn MetadataStore>) -> Self {
        Self { metadata }
    }

    /// Filenames of records matching `filter`. An empty gallery yields an empty list.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: ListFilter) -> Result<Vec<String>, AppError> {
        let filenames = self.metadata.list_filenames(filter).await?;
        tracing::debug!(count = filenames.len(), "Listed images");
        Ok(filenames)
    }
}
