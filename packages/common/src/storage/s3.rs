use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::debug;

use super::error::StorageError;
use super::traits::{ObjectStore, validate_object_path};

/// Connection settings for an S3-compatible endpoint.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
}

/// Object store backed by an S3-compatible bucket (path-style addressing).
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    max_size: u64,
}

impl S3ObjectStore {
    pub fn new(settings: &S3Settings, max_size: u64) -> Result<Self, StorageError> {
        let region = Region::Custom {
            region: settings.region.clone(),
            endpoint: settings.endpoint.clone(),
        };
        let credentials = Credentials::new(
            Some(&settings.access_key),
            Some(&settings.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("invalid credentials: {e}")))?;

        let bucket = Bucket::new(&settings.bucket, region, credentials)
            .map_err(|e| StorageError::Backend(e.to_string()))?
            .with_path_style();

        Ok(Self { bucket, max_size })
    }
}

fn check_status(path: &str, op: &str, status: u16) -> Result<(), StorageError> {
    if !(200..=299).contains(&status) {
        debug!(path, op, status, "S3 request did not succeed");
    }
    match status {
        200..=299 => Ok(()),
        404 => Err(StorageError::NotFound(path.to_string())),
        other => Err(StorageError::Backend(format!(
            "{op} '{path}' returned HTTP {other}"
        ))),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }
        let path = validate_object_path(path)?;

        let response = self
            .bucket
            .put_object_with_content_type(path, &data, content_type)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        check_status(path, "upload", response.status_code())?;

        Ok(path.to_string())
    }

    async fn remove(&self, path: &str) -> Result<bool, StorageError> {
        let path = validate_object_path(path)?;
        let response = self
            .bucket
            .delete_object(path)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        // S3 answers 204 whether or not the key existed.
        match check_status(path, "remove", response.status_code()) {
            Ok(()) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let path = validate_object_path(path)?;
        let (_, status) = self
            .bucket
            .head_object(path)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        match check_status(path, "head", status) {
            Ok(()) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(check_status("a", "upload", 200).is_ok());
        assert!(check_status("a", "remove", 204).is_ok());
        assert!(matches!(
            check_status("a", "head", 404),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            check_status("a", "upload", 403),
            Err(StorageError::Backend(_))
        ));
    }
}
