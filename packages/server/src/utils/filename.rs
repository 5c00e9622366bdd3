use thiserror::Error;

use crate::error::AppError;

/// Why an uploaded file name was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilenameError {
    #[error("Filename cannot be empty")]
    Empty,
    #[error("Invalid filename: path separators are not allowed")]
    ContainsPathSeparator,
    #[error("Invalid filename: '..' is not allowed")]
    PathTraversal,
    #[error("Invalid filename: null bytes are not allowed")]
    NullByte,
    #[error("Invalid filename: hidden files (starting with '.') are not allowed")]
    Hidden,
    /// CR, LF and friends.
    #[error("Invalid filename: control characters are not allowed")]
    ControlCharacter,
    #[error("Invalid filename: at most 255 characters")]
    TooLong,
}

impl From<FilenameError> for AppError {
    fn from(err: FilenameError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Validate the client-supplied name of an uploaded file. Returns it trimmed.
pub fn validate_upload_filename(filename: &str) -> Result<&str, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }
    if trimmed.chars().count() > 255 {
        return Err(FilenameError::TooLong);
    }
    if trimmed.contains('\0') {
        return Err(FilenameError::NullByte);
    }
    // The name ends up in logs and asset names.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }
    if trimmed == ".." {
        return Err(FilenameError::PathTraversal);
    }
    if trimmed.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(trimmed)
}

/// MIME type of an upload: the declared one unless it is missing or generic,
/// otherwise guessed from the extension.
pub fn resolve_content_type(filename: &str, declared: Option<&str>) -> String {
    match declared.map(str::trim) {
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => ct.to_ascii_lowercase(),
        _ => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}

/// Only images and videos can be attached to content.
pub fn is_supported_media_type(content_type: &str) -> bool {
    content_type.starts_with("image/") || content_type.starts_with("video/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert_eq!(validate_upload_filename("cohort.jpg"), Ok("cohort.jpg"));
        assert_eq!(validate_upload_filename("  demo day.mp4 "), Ok("demo day.mp4"));
    }

    #[test]
    fn rejects_unsafe_names() {
        assert_eq!(validate_upload_filename("   "), Err(FilenameError::Empty));
        assert_eq!(
            validate_upload_filename("a/b.png"),
            Err(FilenameError::ContainsPathSeparator)
        );
        assert_eq!(
            validate_upload_filename("a\\b.png"),
            Err(FilenameError::ContainsPathSeparator)
        );
        assert_eq!(validate_upload_filename(".."), Err(FilenameError::PathTraversal));
        assert_eq!(validate_upload_filename(".env"), Err(FilenameError::Hidden));
        assert_eq!(
            validate_upload_filename("a\r\nb.png"),
            Err(FilenameError::ControlCharacter)
        );
        assert_eq!(
            validate_upload_filename(&"x".repeat(256)),
            Err(FilenameError::TooLong)
        );
    }

    #[test]
    fn errors_become_validation_failures() {
        let err: AppError = FilenameError::Hidden.into();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("hidden")));
    }

    #[test]
    fn content_type_falls_back_to_extension() {
        assert_eq!(resolve_content_type("a.png", Some("image/webp")), "image/webp");
        assert_eq!(resolve_content_type("a.png", None), "image/png");
        assert_eq!(
            resolve_content_type("clip.mp4", Some("application/octet-stream")),
            "video/mp4"
        );
        assert_eq!(
            resolve_content_type("notes", None),
            "application/octet-stream"
        );
    }

    #[test]
    fn only_images_and_videos_are_media() {
        assert!(is_supported_media_type("image/png"));
        assert!(is_supported_media_type("video/mp4"));
        assert!(!is_supported_media_type("application/pdf"));
    }
}
