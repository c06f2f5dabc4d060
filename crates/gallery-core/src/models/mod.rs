//! Domain models

pub mod image_record;

pub use image_record::{ImageId, ImageRecord, ListFilter, PublishOutcome, Submission};
