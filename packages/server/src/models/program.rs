use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaItem;
use super::shared::{FieldErrors, double_option, patched};
use crate::entity::program;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    #[schema(example = "Founder Fellowship")]
    pub title: String,
    pub description: String,
    #[schema(example = "incubation")]
    pub category: Option<String>,
    #[schema(example = "12 weeks")]
    pub duration: Option<String>,
    pub link: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgramRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub duration: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub link: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub duration: Option<String>,
    pub link: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub media: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProgramResponse {
    pub fn new(m: program::Model, media: Vec<MediaItem>) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            category: m.category,
            duration: m.duration,
            link: m.link,
            is_active: m.is_active,
            order: m.display_order,
            media,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_program(req: &CreateProgramRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.text("title", &req.title, 200);
    errors.text("description", &req.description, 10_000);
    errors.optional_text("category", req.category.as_deref(), 100);
    errors.optional_text("duration", req.duration.as_deref(), 100);
    errors.link("link", req.link.as_deref());
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}

pub fn validate_update_program(req: &UpdateProgramRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref title) = req.title {
        errors.text("title", title, 200);
    }
    if let Some(ref description) = req.description {
        errors.text("description", description, 10_000);
    }
    errors.optional_text("category", patched(&req.category), 100);
    errors.optional_text("duration", patched(&req.duration), 100);
    errors.link("link", patched(&req.link));
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}
