use async_trait::async_trait;

use super::error::StorageError;

/// Path-addressed object storage for uploaded media.
///
/// Paths are relative to the configured bucket, e.g. `uploads/ab12.png`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` at `path` and return the stored path.
    ///
    /// Uploading to an existing path replaces the object.
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Remove the object at `path`.
    ///
    /// Returns `true` if an object was removed, `false` if none existed.
    async fn remove(&self, path: &str) -> Result<bool, StorageError>;

    /// Check whether an object exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Short backend name for logs and health reports.
    fn backend_name(&self) -> &'static str;
}

/// Reject object paths that are empty, absolute, or try to escape the bucket.
pub fn validate_object_path(path: &str) -> Result<&str, StorageError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(StorageError::InvalidPath("path cannot be empty".into()));
    }
    if trimmed.starts_with('/') || trimmed.contains('\\') || trimmed.contains('\0') {
        return Err(StorageError::InvalidPath(format!(
            "'{trimmed}' must be a relative path"
        )));
    }
    if trimmed
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidPath(format!(
            "'{trimmed}' contains empty or relative segments"
        )));
    }
    Ok(trimmed)
}
