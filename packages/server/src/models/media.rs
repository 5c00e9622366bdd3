use chrono::{DateTime, Utc};
use common::{MediaKind, StorageBackend};
use serde::{Deserialize, Serialize};

use super::shared::{FieldErrors, double_option};
use crate::error::AppError;

/// A registered asset as shown to the dashboard.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaAssetView {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = "spring-cohort.jpg")]
    pub name: String,
    #[schema(example = "image/jpeg")]
    pub mime_type: String,
    pub storage_backend: StorageBackend,
    #[schema(example = "uploads/3f5a...e1.jpg")]
    pub storage_path: Option<String>,
    /// Public URL; `null` when the asset is not publicly servable.
    pub url: Option<String>,
    pub size: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// One media item attached to a content entity, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Association row id.
    pub id: i32,
    pub media_id: Option<i32>,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaKind,
    pub alt_text: Option<String>,
    pub order: i32,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMediaRequest {
    pub name: String,
    pub mime_type: String,
    pub storage_backend: StorageBackend,
    pub storage_path: Option<String>,
    pub archive_ref: Option<String>,
    pub size: Option<i64>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMediaRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub storage_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub archive_ref: Option<Option<String>>,
}

pub fn validate_register_media(req: &RegisterMediaRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.text("name", &req.name, 256);
    errors.text("mimeType", &req.mime_type, 128);
    if !req.mime_type.trim().is_empty() && !req.mime_type.contains('/') {
        errors.add("mimeType", "must look like type/subtype");
    }
    errors.optional_text("storagePath", req.storage_path.as_deref(), 512);
    errors.optional_text("archiveRef", req.archive_ref.as_deref(), 512);
    if let Some(size) = req.size
        && size < 0
    {
        errors.add("size", "must be >= 0");
    }
    errors.finish()
}

pub fn validate_update_media(req: &UpdateMediaRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref name) = req.name {
        errors.text("name", name, 256);
    }
    if let Some(Some(ref path)) = req.storage_path {
        errors.optional_text("storagePath", Some(path), 512);
    }
    if let Some(Some(ref archive)) = req.archive_ref {
        errors.optional_text("archiveRef", Some(archive), 512);
    }
    errors.finish()
}
