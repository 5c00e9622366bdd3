use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaItem;
use super::shared::{FieldErrors, double_option, patched};
use crate::entity::about_content;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAboutRequest {
    pub title: String,
    pub description: String,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAboutRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub mission: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub vision: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AboutResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub media: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AboutResponse {
    pub fn new(m: about_content::Model, media: Vec<MediaItem>) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            mission: m.mission,
            vision: m.vision,
            is_active: m.is_active,
            order: m.display_order,
            media,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_about(req: &CreateAboutRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.text("title", &req.title, 200);
    errors.text("description", &req.description, 10_000);
    errors.optional_text("mission", req.mission.as_deref(), 5000);
    errors.optional_text("vision", req.vision.as_deref(), 5000);
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}

pub fn validate_update_about(req: &UpdateAboutRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref title) = req.title {
        errors.text("title", title, 200);
    }
    if let Some(ref description) = req.description {
        errors.text("description", description, 10_000);
    }
    errors.optional_text("mission", patched(&req.mission), 5000);
    errors.optional_text("vision", patched(&req.vision), 5000);
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}
