//! Validation modules

pub mod submission;

pub use submission::{
    validate_record, validate_submission, FieldViolation, ValidationErrors, MAX_FIELD_LENGTH,
};
