//! Canonical validator for submitter fields and image records.
//!
//! Every rule is checked and every violation is collected, so a caller sees the
//! complete list of problems in one response rather than only the first one.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::constants::form_fields::{ADDRESS, CITY, EMAIL, FIRST_NAME, LAST_NAME, STATE, ZIP};
use crate::models::{ImageRecord, Submission};

/// Maximum length of any single submitter field, in characters.
pub const MAX_FIELD_LENGTH: usize = 255;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$").expect("valid email regex")
});

static STATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2}$").expect("valid state regex"));

static ZIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("valid zip regex"));

/// One violated rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Aggregated field violations. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Names of the violated fields, in the order they were checked.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|v| v.field).collect()
    }

    /// One human-readable message per violation.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.messages().join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

fn is_name(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
        && value.chars().any(char::is_alphabetic)
}

/// Returns false (after recording a violation) when the field is blank or too long.
fn check_present(errors: &mut ValidationErrors, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(field, "is required");
        return false;
    }
    if value.chars().count() > MAX_FIELD_LENGTH {
        errors.push(
            field,
            format!("must be at most {} characters", MAX_FIELD_LENGTH),
        );
        return false;
    }
    true
}

fn check_submission(errors: &mut ValidationErrors, s: &Submission) {
    if check_present(errors, FIRST_NAME, &s.first_name) && !is_name(&s.first_name) {
        errors.push(FIRST_NAME, "must contain only letters");
    }
    if check_present(errors, LAST_NAME, &s.last_name) && !is_name(&s.last_name) {
        errors.push(LAST_NAME, "must contain only letters");
    }
    if check_present(errors, EMAIL, &s.email) && !EMAIL_PATTERN.is_match(&s.email) {
        errors.push(EMAIL, "must be a valid email address");
    }
    check_present(errors, ADDRESS, &s.address);
    check_present(errors, CITY, &s.city);
    if check_present(errors, STATE, &s.state) && !STATE_PATTERN.is_match(&s.state) {
        errors.push(STATE, "must be a 2-letter state code");
    }
    if check_present(errors, ZIP, &s.zip) && !ZIP_PATTERN.is_match(&s.zip) {
        errors.push(ZIP, "must be a 5-digit postal code");
    }
}

/// Validate submitter fields only. Runs before any decode or I/O.
pub fn validate_submission(submission: &Submission) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_submission(&mut errors, submission);
    errors.into_result()
}

/// Validate a complete record: submitter fields, identity, and dimensions.
pub fn validate_record(record: &ImageRecord) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_submission(&mut errors, &record.submitter);

    if record.id.is_nil() {
        errors.push("id", "must not be nil");
    }
    if record.filename != ImageRecord::filename_for(record.id) {
        errors.push("filename", "does not match the record id");
    }
    if record.width <= 0 {
        errors.push("width", "must be positive");
    }
    if record.height <= 0 {
        errors.push("height", "must be positive");
    }

    errors.into_result()
}
