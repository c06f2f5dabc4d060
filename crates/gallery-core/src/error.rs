//! Error types module
//!
//! All failures in the gallery are unified under the `AppError` enum. Each variant
//! describes how it should be presented through the `ErrorMetadata` trait, so the
//! HTTP layer never needs to know about individual error cases.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::fmt;
use std::io;
use std::time::Duration;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

use crate::validation::ValidationErrors;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Client-facing messages (one per problem)
    fn client_messages(&self) -> Vec<String>;

    /// Whether details should be hidden from the client
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// What went wrong with an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactErrorKind {
    /// The payload could not be decoded as a supported image.
    UnreadableImage,
    /// Writing an artifact to durable storage failed.
    WriteFailed,
}

impl fmt::Display for ArtifactErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactErrorKind::UnreadableImage => f.write_str("unreadable image"),
            ArtifactErrorKind::WriteFailed => f.write_str("write failed"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Image is {width}x{height}, must be at least {min_width}x{min_height}")]
    ImageTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    #[error("Image is {width}x{height}, must be at most {max_width}x{max_height}")]
    ImageTooLarge {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Artifact error ({kind}): {message}")]
    Artifact {
        kind: ArtifactErrorKind,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Metadata store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("{operation} timed out after {}ms", .after.as_millis())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn unreadable_image(message: impl Into<String>) -> Self {
        AppError::Artifact {
            kind: ArtifactErrorKind::UnreadableImage,
            message: message.into(),
        }
    }

    pub fn write_failed(message: impl Into<String>) -> Self {
        AppError::Artifact {
            kind: ArtifactErrorKind::WriteFailed,
            message: message.into(),
        }
    }

    /// True for any error the caller can fix by changing the submission.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::ImageTooSmall { .. } | AppError::ImageTooLarge { .. }
        )
    }

    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::ImageTooSmall { .. } => "ImageTooSmall",
            AppError::ImageTooLarge { .. } => "ImageTooLarge",
            AppError::Artifact {
                kind: ArtifactErrorKind::UnreadableImage,
                ..
            } => "UnreadableImage",
            AppError::Artifact {
                kind: ArtifactErrorKind::WriteFailed,
                ..
            } => "ArtifactWriteFailed",
            AppError::NotFound(_) => "NotFound",
            #[cfg(feature = "sqlx")]
            AppError::Database(_) => "Database",
            AppError::StoreUnavailable(_) => "StoreUnavailable",
            AppError::Timeout { .. } => "Timeout",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => AppError::NotFound("Record not found".to_string()),
            SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => {
                AppError::StoreUnavailable(err.to_string())
            }
            other => AppError::Database(other),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::Validation(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::BadRequest(format!("Invalid identifier: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, bool, LogLevel) {
    match err {
        AppError::Validation(_) => (400, "VALIDATION_ERROR", false, false, LogLevel::Debug),
        AppError::ImageTooSmall { .. } => (400, "IMAGE_TOO_SMALL", false, false, LogLevel::Debug),
        AppError::ImageTooLarge { .. } => (400, "IMAGE_TOO_LARGE", false, false, LogLevel::Debug),
        AppError::Artifact {
            kind: ArtifactErrorKind::UnreadableImage,
            ..
        } => (400, "UNREADABLE_IMAGE", false, false, LogLevel::Warn),
        AppError::Artifact {
            kind: ArtifactErrorKind::WriteFailed,
            ..
        } => (500, "ARTIFACT_WRITE_FAILED", true, true, LogLevel::Error),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, false, LogLevel::Debug),
        #[cfg(feature = "sqlx")]
        AppError::Database(_) => (503, "DATABASE_ERROR", true, true, LogLevel::Error),
        AppError::StoreUnavailable(_) => (503, "STORE_UNAVAILABLE", true, true, LogLevel::Error),
        AppError::Timeout { .. } => (504, "TIMEOUT", true, true, LogLevel::Warn),
        AppError::BadRequest(_) => (400, "BAD_REQUEST", false, false, LogLevel::Debug),
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", false, false, LogLevel::Debug),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => {
            (500, "INTERNAL_ERROR", true, true, LogLevel::Error)
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }

    fn client_messages(&self) -> Vec<String> {
        match self {
            AppError::Validation(errors) => errors.messages(),
            AppError::ImageTooSmall { .. } | AppError::ImageTooLarge { .. } => {
                vec![self.to_string()]
            }
            AppError::Artifact {
                kind: ArtifactErrorKind::UnreadableImage,
                ..
            } => vec!["File is not a readable JPEG, GIF or PNG image".to_string()],
            AppError::Artifact {
                kind: ArtifactErrorKind::WriteFailed,
                ..
            } => vec!["Could not upload image".to_string()],
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Unauthorized(msg) => {
                vec![msg.clone()]
            }
            #[cfg(feature = "sqlx")]
            AppError::Database(_) => vec!["Failed to access metadata store".to_string()],
            AppError::StoreUnavailable(_) => vec!["Metadata store unavailable".to_string()],
            AppError::Timeout { .. } => vec!["Request timed out".to_string()],
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                vec!["Internal server error".to_string()]
            }
        }
    }
}
