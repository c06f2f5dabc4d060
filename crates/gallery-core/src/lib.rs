//! Gallery Core Library
//!
//! This crate provides the core domain model, error types, configuration, and the
//! canonical submitter validator shared across all gallery components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, MetadataBackend};
pub use error::{AppError, ArtifactErrorKind, ErrorMetadata, LogLevel};
pub use models::{ImageId, ImageRecord, ListFilter, PublishOutcome, Submission};
pub use validation::{validate_record, validate_submission, FieldViolation, ValidationErrors};
