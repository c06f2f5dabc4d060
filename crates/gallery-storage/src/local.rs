use crate::keys::{staging_name, validate_artifact_name};
use crate::traits::{ArtifactStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem artifact store
///
/// Artifacts live directly under `root` (the public image directory). A write
/// goes to a hidden staging file first and is linked into place once synced,
/// so a failed write never leaves a truncated artifact under its final name
/// and an existing artifact is never replaced.
#[derive(Clone, Debug)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    /// Create a new LocalArtifactStore, creating `root` if needed.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create image directory {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalArtifactStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn name_to_path(&self, name: &str) -> StorageResult<PathBuf> {
        validate_artifact_name(name)?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn write(&self, name: &str, data: Vec<u8>) -> StorageResult<()> {
        let path = self.name_to_path(name)?;
        let staging = self.root.join(staging_name(name));
        let size = data.len();
        let start = std::time::Instant::now();

        // A staging file that already exists belongs to another writer of the
        // same name; leave it alone.
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&staging)
            .await
            .map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to create file {}: {}",
                    staging.display(),
                    e
                ))
            })?;

        let result = async {
            file.write_all(&data).await.map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to write file {}: {}",
                    staging.display(),
                    e
                ))
            })?;

            file.sync_all().await.map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to sync file {}: {}",
                    staging.display(),
                    e
                ))
            })?;

            // Unlike rename, hard_link fails instead of replacing an existing target.
            fs::hard_link(&staging, &path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    StorageError::WriteFailed(format!("Artifact {} already exists", name))
                } else {
                    StorageError::WriteFailed(format!(
                        "Failed to move {} into place: {}",
                        path.display(),
                        e
                    ))
                }
            })
        }
        .await;
        drop(file);

        if let Err(e) = fs::remove_file(&staging).await {
            tracing::warn!(path = %staging.display(), error = %e, "Failed to remove staging file");
        }

        if let Err(e) = result {
            tracing::error!(path = %path.display(), error = %e, "Artifact write failed");
            return Err(e);
        }

        tracing::info!(
            path = %path.display(),
            name = %name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Artifact write successful"
        );

        Ok(())
    }

    async fn read(&self, name: &str) -> StorageResult<Vec<u8>> {
        let path = self.name_to_path(name)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(name.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), size_bytes = data.len(), "Artifact read");

        Ok(data)
    }

    async fn exists(&self, name: &str) -> StorageResult<bool> {
        let path = self.name_to_path(name)?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.name_to_path(name)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), name = %name, "Artifact deleted");

        Ok(())
    }
}
