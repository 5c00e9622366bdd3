use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaItem;
use super::shared::{FieldErrors, double_option, patched};
use crate::entity::hero;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHeroRequest {
    #[schema(example = "Build the future with us")]
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub cta_text: Option<String>,
    #[schema(example = "/programs")]
    pub cta_link: Option<String>,
    /// Defaults to `true`. Creating a hero always deactivates the others.
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    /// Registry asset ids in display order.
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHeroRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub subtitle: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub cta_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub cta_link: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    /// Absent leaves media untouched; `[]` removes all media.
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeroResponse {
    pub id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub media: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HeroResponse {
    pub fn new(m: hero::Model, media: Vec<MediaItem>) -> Self {
        Self {
            id: m.id,
            title: m.title,
            subtitle: m.subtitle,
            description: m.description,
            cta_text: m.cta_text,
            cta_link: m.cta_link,
            is_active: m.is_active,
            order: m.display_order,
            media,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_hero(req: &CreateHeroRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.text("title", &req.title, 200);
    errors.optional_text("subtitle", req.subtitle.as_deref(), 300);
    errors.optional_text("description", req.description.as_deref(), 5000);
    errors.optional_text("ctaText", req.cta_text.as_deref(), 100);
    errors.link("ctaLink", req.cta_link.as_deref());
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}

pub fn validate_update_hero(req: &UpdateHeroRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref title) = req.title {
        errors.text("title", title, 200);
    }
    errors.optional_text("subtitle", patched(&req.subtitle), 300);
    errors.optional_text("description", patched(&req.description), 5000);
    errors.optional_text("ctaText", patched(&req.cta_text), 100);
    errors.link("ctaLink", patched(&req.cta_link));
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}
