use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaItem;
use super::shared::{FieldErrors, double_option, patched};
use crate::entity::founder;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFounderRequest {
    pub name: String,
    #[schema(example = "Co-founder & CEO")]
    pub title: String,
    pub bio: Option<String>,
    pub quote: Option<String>,
    pub linkedin_url: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFounderRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub quote: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub linkedin_url: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FounderResponse {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub bio: Option<String>,
    pub quote: Option<String>,
    pub linkedin_url: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub media: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FounderResponse {
    pub fn new(m: founder::Model, media: Vec<MediaItem>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            title: m.title,
            bio: m.bio,
            quote: m.quote,
            linkedin_url: m.linkedin_url,
            is_active: m.is_active,
            order: m.display_order,
            media,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_founder(req: &CreateFounderRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.text("name", &req.name, 120);
    errors.text("title", &req.title, 200);
    errors.optional_text("bio", req.bio.as_deref(), 5000);
    errors.optional_text("quote", req.quote.as_deref(), 2000);
    errors.link("linkedinUrl", req.linkedin_url.as_deref());
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}

pub fn validate_update_founder(req: &UpdateFounderRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref name) = req.name {
        errors.text("name", name, 120);
    }
    if let Some(ref title) = req.title {
        errors.text("title", title, 200);
    }
    errors.optional_text("bio", patched(&req.bio), 5000);
    errors.optional_text("quote", patched(&req.quote), 2000);
    errors.link("linkedinUrl", patched(&req.linkedin_url));
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}
