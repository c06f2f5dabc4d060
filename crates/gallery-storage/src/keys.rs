//! Artifact name rules shared by all backends.

use crate::traits::{StorageError, StorageResult};

/// Check that `name` is a single flat path segment.
///
/// Rejects empty names, separators, `..`, and dot-files (the local backend
/// uses a leading `.` for in-flight temporary files).
pub fn validate_artifact_name(name: &str) -> StorageResult<()> {
    if name.is_empty() {
        return Err(StorageError::InvalidName("empty name".to_string()));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(StorageError::InvalidName(format!(
            "'{}' contains path components",
            name
        )));
    }
    if name.starts_with('.') {
        return Err(StorageError::InvalidName(format!(
            "'{}' must not start with '.'",
            name
        )));
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(StorageError::InvalidName(format!(
            "'{}' contains control characters",
            name.escape_debug()
        )));
    }
    Ok(())
}

/// Name of the temporary file a write goes through before being renamed into place.
pub fn staging_name(name: &str) -> String {
    format!(".{}.partial", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_generated_names() {
        assert!(validate_artifact_name("0b8f3c1e-8f0d-4c4b-9a43-2f7f1e0f6a11.png").is_ok());
        assert!(validate_artifact_name("thumb_0b8f3c1e-8f0d-4c4b-9a43-2f7f1e0f6a11.png").is_ok());
    }

    #[test]
    fn test_rejects_traversal_and_hidden() {
        for name in ["", "../etc/passwd", "a/b.png", "a\\b.png", ".hidden", "x\n.png"] {
            assert!(
                matches!(validate_artifact_name(name), Err(StorageError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_staging_name_is_hidden() {
        let staged = staging_name("a.png");
        assert!(staged.starts_with('.'));
        assert!(validate_artifact_name(&staged).is_err());
    }
}
