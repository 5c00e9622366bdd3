use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::error::StorageError;
use super::traits::{ObjectStore, validate_object_path};

/// Filesystem-backed object store.
///
/// Objects are stored at `{base_path}/{bucket}/{path}`. Writes go to a temp
/// file first and are renamed into place, so readers never see partial files.
pub struct FilesystemObjectStore {
    bucket_root: PathBuf,
    tmp_dir: PathBuf,
    max_size: u64,
}

impl FilesystemObjectStore {
    /// Create a new filesystem object store.
    pub async fn new(base_path: PathBuf, bucket: &str, max_size: u64) -> Result<Self, StorageError> {
        let bucket_root = base_path.join(bucket);
        let tmp_dir = base_path.join(".tmp");
        fs::create_dir_all(&bucket_root).await?;
        fs::create_dir_all(&tmp_dir).await?;
        Ok(Self {
            bucket_root,
            tmp_dir,
            max_size,
        })
    }

    fn object_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        Ok(self.bucket_root.join(validate_object_path(path)?))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.tmp_dir.join(uuid::Uuid::new_v4().to_string())
    }
}

async fn discard_temp(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        debug!(path = %path.display(), error = %e, "Could not remove temp file");
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let target = self.object_path(path)?;
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, &data).await {
            discard_temp(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &target).await {
            discard_temp(&temp_path).await;
            return Err(e.into());
        }

        Ok(validate_object_path(path)?.to_string())
    }

    async fn remove(&self, path: &str) -> Result<bool, StorageError> {
        let target = self.object_path(path)?;
        match fs::remove_file(&target).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let target = self.object_path(path)?;
        Ok(fs::try_exists(&target).await?)
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
