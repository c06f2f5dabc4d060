//! Test doubles and fixtures shared by the service tests.

use async_trait::async_trait;
use gallery_core::{AppError, ImageId, ImageRecord, ListFilter, PublishOutcome, Submission};
use gallery_db::{InMemoryMetadataStore, MetadataStore};
use gallery_storage::{ArtifactStore, LocalArtifactStore, StorageError, StorageResult};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn ada() -> Submission {
    Submission {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        address: "1 Infinite Loop".to_string(),
        city: "X".to_string(),
        state: "CA".to_string(),
        zip: "94000".to_string(),
    }
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([12, 120, 200, 255]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

pub fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

/// Wraps a real local store and fails every write whose name matches `fail_when`.
pub struct FailingArtifactStore {
    inner: LocalArtifactStore,
    fail_when: fn(&str) -> bool,
    pub writes: AtomicUsize,
}

impl FailingArtifactStore {
    pub fn new(inner: LocalArtifactStore, fail_when: fn(&str) -> bool) -> Self {
        Self {
            inner,
            fail_when,
            writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ArtifactStore for FailingArtifactStore {
    async fn write(&self, name: &str, data: Vec<u8>) -> StorageResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if (self.fail_when)(name) {
            return Err(StorageError::WriteFailed(format!(
                "injected failure for {}",
                name
            )));
        }
        self.inner.write(name, data).await
    }

    async fn read(&self, name: &str) -> StorageResult<Vec<u8>> {
        self.inner.read(name).await
    }

    async fn exists(&self, name: &str) -> StorageResult<bool> {
        self.inner.exists(name).await
    }

    async fn delete(&self, name: &str) -> StorageResult<()> {
        self.inner.delete(name).await
    }
}

/// Which metadata operation should fail.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Insert,
    Everything,
}

/// In-memory store with injected `StoreUnavailable` failures.
pub struct FailingMetadataStore {
    inner: InMemoryMetadataStore,
    fail_on: FailOn,
}

impl FailingMetadataStore {
    pub fn new(fail_on: FailOn) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryMetadataStore::new(),
            fail_on,
        })
    }

    pub fn inner(&self) -> &InMemoryMetadataStore {
        &self.inner
    }

    fn unavailable() -> AppError {
        AppError::StoreUnavailable("injected: connection refused".to_string())
    }
}

#[async_trait]
impl MetadataStore for FailingMetadataStore {
    async fn insert(&self, _record: &ImageRecord) -> Result<ImageRecord, AppError> {
        Err(Self::unavailable())
    }

    async fn get(&self, id: ImageId) -> Result<Option<ImageRecord>, AppError> {
        match self.fail_on {
            FailOn::Everything => Err(Self::unavailable()),
            FailOn::Insert => self.inner.get(id).await,
        }
    }

    async fn mark_published(&self, id: ImageId) -> Result<PublishOutcome, AppError> {
        match self.fail_on {
            FailOn::Everything => Err(Self::unavailable()),
            FailOn::Insert => self.inner.mark_published(id).await,
        }
    }

    async fn list_filenames(&self, filter: ListFilter) -> Result<Vec<String>, AppError> {
        match self.fail_on {
            FailOn::Everything => Err(Self::unavailable()),
            FailOn::Insert => self.inner.list_filenames(filter).await,
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        match self.fail_on {
            FailOn::Everything => Err(Self::unavailable()),
            FailOn::Insert => Ok(()),
        }
    }
}
