use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use crate::constants::{ARTIFACT_EXTENSION, THUMBNAIL_PREFIX};

/// Opaque record identifier. Doubles as the stem of the artifact filenames.
pub type ImageId = Uuid;

/// Submitter details as received from the upload form.
///
/// Owned exclusively by one [`ImageRecord`] and never mutated after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Submission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Submission {
    /// Trim surrounding whitespace from every field.
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip: self.zip.trim().to_string(),
        }
    }
}

/// Metadata describing one uploaded image.
///
/// `published` is the only field that changes after the record is committed,
/// and only from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ImageRecord {
    pub id: ImageId,
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    #[serde(flatten)]
    pub submitter: Submission,
    pub filename: String,
    pub width: i32,
    pub height: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ImageRecord {
    /// Build an unpublished candidate with a freshly generated id.
    ///
    /// Dimensions stay at zero until the image has been decoded; a candidate
    /// with zero dimensions never passes [`crate::validate_record`].
    pub fn candidate(submitter: Submission) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        Self {
            id,
            submitter,
            filename: Self::filename_for(id),
            width: 0,
            height: 0,
            published: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = i32::try_from(width).unwrap_or(i32::MAX);
        self.height = i32::try_from(height).unwrap_or(i32::MAX);
        self
    }

    /// Artifact filename derived from an id: `<id>.png`.
    pub fn filename_for(id: ImageId) -> String {
        format!("{}.{}", id, ARTIFACT_EXTENSION)
    }

    /// Filename of the thumbnail artifact: `thumb_<filename>`.
    pub fn thumbnail_filename(&self) -> String {
        format!("{}{}", THUMBNAIL_PREFIX, self.filename)
    }
}

/// Which records a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListFilter {
    #[default]
    All,
    PublishedOnly,
}

impl ListFilter {
    /// Required value of `published`, if the filter constrains it.
    pub fn published(self) -> Option<bool> {
        match self {
            ListFilter::All => None,
            ListFilter::PublishedOnly => Some(true),
        }
    }

    pub fn matches(self, record: &ImageRecord) -> bool {
        self.published().map_or(true, |p| record.published == p)
    }
}

/// Result of a publish request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishOutcome {
    Published,
    AlreadyPublished,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> Submission {
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

    #[test]
    fn test_candidate_derives_filename_from_id() {
        let record = ImageRecord::candidate(submission());
        assert_eq!(record.filename, format!("{}.png", record.id));
        assert_eq!(record.thumbnail_filename(), format!("thumb_{}.png", record.id));
        assert!(!record.published);
        assert_eq!((record.width, record.height), (0, 0));
    }

    #[test]
    fn test_candidates_get_unique_ids() {
        let a = ImageRecord::candidate(submission());
        let b = ImageRecord::candidate(submission());
        assert_ne!(a.id, b.id);
        assert_ne!(a.filename, b.filename);
    }

    #[test]
    fn test_with_dimensions() {
        let record = ImageRecord::candidate(submission()).with_dimensions(600, 480);
        assert_eq!(record.width, 600);
        assert_eq!(record.height, 480);
    }

    #[test]
    fn test_normalized_trims_fields() {
        let raw = Submission {
            first_name: "  Ada ".to_string(),
            zip: "94000\n".to_string(),
            ..submission()
        };
        let normalized = raw.normalized();
        assert_eq!(normalized.first_name, "Ada");
        assert_eq!(normalized.zip, "94000");
    }

    #[test]
    fn test_list_filter_matches() {
        let mut record = ImageRecord::candidate(submission());
        assert!(ListFilter::All.matches(&record));
        assert!(!ListFilter::PublishedOnly.matches(&record));
        record.published = true;
        assert!(ListFilter::PublishedOnly.matches(&record));
    }
}
