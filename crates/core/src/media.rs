//! Media path rules.
//!
//! Media content is addressed by a relative path of the form
//! `<project_id>/<file name>`. Paths are unique across all media and must
//! never escape the storage root.

use std::path::{Component, Path};

use crate::error::CoreError;
use crate::types::DbId;

/// File extensions treated as images when listing project media.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Maximum length of a media display name.
pub const MAX_MEDIA_NAME_LEN: usize = 255;

/// Build the storage path for a file uploaded to a project.
///
/// Only the final component of `file_name` is kept, so a client-supplied
/// `"../../etc/passwd"` is rejected rather than silently flattened.
pub fn build_media_path(project_id: DbId, file_name: &str) -> Result<String, CoreError> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("File name must not be empty".into()));
    }
    if trimmed.contains('/') || trimmed.contains('\\') || trimmed == "." || trimmed == ".." {
        return Err(CoreError::Forbidden(format!(
            "File name '{trimmed}' is not a plain file name"
        )));
    }
    let path = format!("{project_id}/{trimmed}");
    validate_relative_path(&path)?;
    Ok(path)
}

/// Reject absolute paths and any path containing `..` components.
pub fn validate_relative_path(path: &str) -> Result<(), CoreError> {
    if path.is_empty() {
        return Err(CoreError::Validation("Path must not be empty".into()));
    }
    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(CoreError::Forbidden(format!(
                    "Path '{path}' escapes the media root"
                )))
            }
        }
    }
    Ok(())
}

/// Returns `true` if the path has one of the [`IMAGE_EXTENSIONS`].
pub fn is_image(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Validate a media display name.
pub fn validate_media_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Media name must not be empty".into()));
    }
    if name.chars().count() > MAX_MEDIA_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Media name must be at most {MAX_MEDIA_NAME_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn builds_project_scoped_path() {
        let id = Uuid::new_v4();
        let path = build_media_path(id, "report.pdf").unwrap();
        assert_eq!(path, format!("{id}/report.pdf"));
    }

    #[test]
    fn rejects_nested_or_parent_file_names() {
        let id = Uuid::new_v4();
        assert_matches!(
            build_media_path(id, "../secret.txt"),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(build_media_path(id, "a/b.txt"), Err(CoreError::Forbidden(_)));
        assert_matches!(build_media_path(id, ".."), Err(CoreError::Forbidden(_)));
        assert_matches!(build_media_path(id, "  "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn relative_path_validation() {
        assert!(validate_relative_path("abc/def.png").is_ok());
        assert_matches!(
            validate_relative_path("/etc/passwd"),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            validate_relative_path("abc/../../x"),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn image_detection_is_case_insensitive() {
        assert!(is_image("p/photo.JPG"));
        assert!(is_image("p/diagram.svg"));
        assert!(!is_image("p/paper.pdf"));
        assert!(!is_image("p/noext"));
    }

    #[test]
    fn media_name_rules() {
        assert!(validate_media_name("Poster").is_ok());
        assert_matches!(validate_media_name(""), Err(CoreError::Validation(_)));
        let long = "x".repeat(MAX_MEDIA_NAME_LEN + 1);
        assert_matches!(validate_media_name(&long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn media_name_limit_counts_characters() {
        let accented = "é".repeat(MAX_MEDIA_NAME_LEN);
        assert!(accented.len() > MAX_MEDIA_NAME_LEN);
        assert!(validate_media_name(&accented).is_ok());

        let too_long = "é".repeat(MAX_MEDIA_NAME_LEN + 1);
        assert_matches!(validate_media_name(&too_long), Err(CoreError::Validation(_)));
    }
}
