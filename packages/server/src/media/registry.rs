use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use common::storage::{ObjectStore, object_key, validate_object_path};
use common::{StorageBackend, public_bucket_prefix, public_object_url};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::entity::media_asset;
use crate::error::AppError;
use crate::models::media::MediaAssetView;

/// Input for [`MediaRegistry::register`].
#[derive(Debug, Clone)]
pub struct NewMediaAsset {
    pub name: String,
    pub mime_type: String,
    pub storage_backend: StorageBackend,
    pub storage_path: Option<String>,
    pub archive_ref: Option<String>,
    pub size: Option<i64>,
}

/// Changes accepted by [`MediaRegistry::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct MediaAssetChanges {
    pub name: Option<String>,
    pub storage_path: Option<Option<String>>,
    pub archive_ref: Option<Option<String>>,
}

/// Tracks uploaded assets and decides which of them are publicly servable.
#[derive(Clone)]
pub struct MediaRegistry {
    store: Option<Arc<dyn ObjectStore>>,
    public_base_url: Option<String>,
    bucket: String,
}

impl MediaRegistry {
    pub fn new(config: &StorageConfig, store: Option<Arc<dyn ObjectStore>>) -> Self {
        Self::from_parts(config.public_base_url.clone(), config.bucket.clone(), store)
    }

    pub fn from_parts(
        public_base_url: Option<String>,
        bucket: String,
        store: Option<Arc<dyn ObjectStore>>,
    ) -> Self {
        Self {
            store,
            public_base_url: public_base_url.filter(|u| !u.trim().is_empty()),
            bucket,
        }
    }

    /// Name of the configured object store, if any.
    pub fn store_name(&self) -> Option<&'static str> {
        self.store.as_ref().map(|s| s.backend_name())
    }

    fn base_url(&self) -> Result<&str, AppError> {
        self.public_base_url.as_deref().ok_or_else(|| {
            AppError::Configuration("storage.public_base_url is not set".into())
        })
    }

    /// Public URL for an object key in the bucket.
    pub fn public_url(&self, path: &str) -> Result<String, AppError> {
        Ok(public_object_url(self.base_url()?, &self.bucket, path))
    }

    /// Resolve the public URL of an asset.
    ///
    /// `Ok(None)` when the asset has no object-storage path. The archive
    /// reference is never consulted.
    pub fn resolve_url(&self, asset: &media_asset::Model) -> Result<Option<String>, AppError> {
        if asset.storage_backend != StorageBackend::ObjectStorage {
            return Ok(None);
        }
        match asset.storage_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => self.public_url(path).map(Some),
            _ => Ok(None),
        }
    }

    /// Whether `url` points into this registry's public bucket.
    pub fn is_trusted_url(&self, url: &str) -> bool {
        let Some(base) = self.public_base_url.as_deref() else {
            return false;
        };
        let prefix = format!("{}/", public_bucket_prefix(base, &self.bucket));
        url.strip_prefix(&prefix)
            .is_some_and(|rest| validate_object_path(rest).is_ok() && !rest.contains(['?', '#']))
    }

    pub fn view(&self, asset: media_asset::Model) -> Result<MediaAssetView, AppError> {
        let url = self.resolve_url(&asset)?;
        Ok(Self::to_view(asset, url))
    }

    fn to_view(asset: media_asset::Model, url: Option<String>) -> MediaAssetView {
        MediaAssetView {
            id: asset.id,
            name: asset.name,
            mime_type: asset.mime_type,
            storage_backend: asset.storage_backend,
            storage_path: asset.storage_path,
            url,
            size: asset.size,
            created_at: asset.created_at,
        }
    }

    /// Insert a registry row. No size or type checks happen here.
    pub async fn register<C: ConnectionTrait>(
        &self,
        db: &C,
        new: NewMediaAsset,
    ) -> Result<media_asset::Model, AppError> {
        let storage_path = match new.storage_path {
            Some(path) => Some(validate_object_path(&path)?.to_string()),
            None => None,
        };

        let model = media_asset::ActiveModel {
            name: Set(new.name.trim().to_string()),
            mime_type: Set(new.mime_type.trim().to_ascii_lowercase()),
            storage_backend: Set(new.storage_backend),
            storage_path: Set(storage_path),
            archive_ref: Set(new.archive_ref),
            size: Set(new.size),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(db).await?)
    }

    /// Store the bytes in object storage and register the resulting asset.
    pub async fn upload<C: ConnectionTrait>(
        &self,
        db: &C,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
        display_name: Option<String>,
    ) -> Result<media_asset::Model, AppError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| AppError::NotConfigured("Object storage is not configured".into()))?;

        let size = data.len() as i64;
        let key = object_key(file_name, &data);
        // Keys are content-addressed, so an existing object already holds these bytes.
        let path = if store.exists(&key).await? {
            debug!(path = %key, "Reusing stored media blob");
            key
        } else {
            let path = store.upload(&key, data, content_type).await?;
            info!(path = %path, size, "Stored uploaded media");
            path
        };

        self.register(
            db,
            NewMediaAsset {
                name: display_name.unwrap_or_else(|| file_name.to_string()),
                mime_type: content_type.to_string(),
                storage_backend: StorageBackend::ObjectStorage,
                storage_path: Some(path),
                archive_ref: None,
                size: Some(size),
            },
        )
        .await
    }

    pub async fn get<C: ConnectionTrait>(
        &self,
        db: &C,
        id: i32,
    ) -> Result<media_asset::Model, AppError> {
        media_asset::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Media asset {id} not found")))
    }

    /// Fetch many assets in one query, keyed by id. Unknown ids are absent.
    pub async fn find_many<C: ConnectionTrait>(
        &self,
        db: &C,
        ids: &[i32],
    ) -> Result<HashMap<i32, media_asset::Model>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let assets = media_asset::Entity::find()
            .filter(media_asset::Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await?;
        Ok(assets.into_iter().map(|a| (a.id, a)).collect())
    }

    /// All assets, newest first.
    pub async fn list_all<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<media_asset::Model>, AppError> {
        Ok(media_asset::Entity::find()
            .order_by_desc(media_asset::Column::CreatedAt)
            .order_by_desc(media_asset::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn update<C: ConnectionTrait>(
        &self,
        db: &C,
        id: i32,
        changes: MediaAssetChanges,
    ) -> Result<media_asset::Model, AppError> {
        let existing = self.get(db, id).await?;
        let mut active: media_asset::ActiveModel = existing.into();

        if let Some(name) = changes.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(path) = changes.storage_path {
            let path = match path {
                Some(p) => Some(validate_object_path(&p)?.to_string()),
                None => None,
            };
            active.storage_path = Set(path);
        }
        if let Some(archive_ref) = changes.archive_ref {
            active.archive_ref = Set(archive_ref);
        }

        Ok(active.update(db).await?)
    }

    /// Delete an asset and, best effort, its blob.
    ///
    /// A failing blob removal is logged and does not keep the row alive.
    /// Associations pointing at the asset are left behind and stop resolving.
    pub async fn delete_asset<C: ConnectionTrait>(
        &self,
        db: &C,
        id: i32,
    ) -> Result<MediaAssetView, AppError> {
        let asset = self.get(db, id).await?;

        if asset.storage_backend == StorageBackend::ObjectStorage
            && let Some(path) = asset.storage_path.as_deref()
        {
            let shared = media_asset::Entity::find()
                .filter(media_asset::Column::StoragePath.eq(path))
                .filter(media_asset::Column::Id.ne(id))
                .count(db)
                .await?;
            match &self.store {
                Some(_) if shared > 0 => {
                    info!(media_id = id, path, shared, "Media blob still referenced; kept")
                }
                Some(store) => match store.remove(path).await {
                    Ok(true) => info!(media_id = id, path, "Removed media blob"),
                    Ok(false) => warn!(media_id = id, path, "Media blob was already gone"),
                    Err(e) => {
                        warn!(media_id = id, path, error = %e, "Failed to remove media blob; deleting row anyway")
                    }
                },
                None => warn!(media_id = id, path, "No object store configured; blob left in place"),
            }
        }

        media_asset::Entity::delete_by_id(id).exec(db).await?;

        let url = self.resolve_url(&asset).unwrap_or_else(|e| {
            warn!(media_id = id, error = ?e, "Could not resolve URL of deleted asset");
            None
        });
        Ok(Self::to_view(asset, url))
    }
}
