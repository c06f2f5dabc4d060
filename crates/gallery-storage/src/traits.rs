//! Artifact store abstraction
//!
//! This module defines the ArtifactStore trait that all artifact backends must implement.

use async_trait::async_trait;
use gallery_core::AppError;
use thiserror::Error;

/// Artifact storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Invalid artifact name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) => AppError::NotFound(format!("Artifact {}", name)),
            StorageError::InvalidName(msg) => AppError::Internal(format!("Invalid artifact name: {}", msg)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            other => AppError::write_failed(other.to_string()),
        }
    }
}

/// Artifact store abstraction
///
/// Writes are whole-file: a reader either sees the complete artifact or no
/// artifact at all. Names are flat and unique per ingestion, so concurrent
/// writers never target the same path.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write `data` under `name`, replacing nothing: callers generate unique names.
    async fn write(&self, name: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read an artifact back in full.
    async fn read(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Check if an artifact exists
    async fn exists(&self, name: &str) -> StorageResult<bool>;

    /// Delete an artifact. Deleting a missing artifact is not an error.
    async fn delete(&self, name: &str) -> StorageResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::ErrorMetadata;

    #[test]
    fn test_write_errors_become_write_failed() {
        let err: AppError = StorageError::WriteFailed("disk full".to_string()).into();
        assert_eq!(err.error_code(), "ARTIFACT_WRITE_FAILED");
        assert_eq!(err.http_status_code(), 500);

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = StorageError::from(io).into();
        assert_eq!(err.error_code(), "ARTIFACT_WRITE_FAILED");
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let err: AppError = StorageError::NotFound("thumb_x.png".to_string()).into();
        assert_eq!(err.http_status_code(), 404);
    }
}
