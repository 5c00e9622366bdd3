use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaItem;
use super::shared::{FieldErrors, double_option, patched};
use crate::entity::event_gallery_item;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryItemRequest {
    /// Event the item belongs to. Not checked against the events table.
    pub event_id: Option<i32>,
    pub title: String,
    pub caption: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryItemRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub event_id: Option<Option<i32>>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub caption: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct GalleryPublicQuery {
    /// Only items attached to this event.
    pub event_id: Option<i32>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItemResponse {
    pub id: i32,
    pub event_id: Option<i32>,
    pub title: String,
    pub caption: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub media: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GalleryItemResponse {
    pub fn new(m: event_gallery_item::Model, media: Vec<MediaItem>) -> Self {
        Self {
            id: m.id,
            event_id: m.event_id,
            title: m.title,
            caption: m.caption,
            is_active: m.is_active,
            order: m.display_order,
            media,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn check_event_id(errors: &mut FieldErrors, event_id: Option<i32>) {
    if let Some(id) = event_id
        && id <= 0
    {
        errors.add("eventId", "must be a positive id");
    }
}

pub fn validate_create_gallery_item(req: &CreateGalleryItemRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    check_event_id(&mut errors, req.event_id);
    errors.text("title", &req.title, 200);
    errors.optional_text("caption", req.caption.as_deref(), 1000);
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}

pub fn validate_update_gallery_item(req: &UpdateGalleryItemRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    check_event_id(&mut errors, req.event_id.flatten());
    if let Some(ref title) = req.title {
        errors.text("title", title, 200);
    }
    errors.optional_text("caption", patched(&req.caption), 1000);
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}
