use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaItem;
use super::shared::{FieldErrors, double_option, patched};
use crate::entity::mentor_talk;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMentorTalkRequest {
    pub title: String,
    pub speaker: String,
    pub speaker_role: Option<String>,
    pub description: Option<String>,
    pub talk_date: Option<DateTime<Utc>>,
    pub video_url: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMentorTalkRequest {
    pub title: Option<String>,
    pub speaker: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub speaker_role: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub talk_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub video_url: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentorTalkResponse {
    pub id: i32,
    pub title: String,
    pub speaker: String,
    pub speaker_role: Option<String>,
    pub description: Option<String>,
    pub talk_date: Option<DateTime<Utc>>,
    pub video_url: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub media: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MentorTalkResponse {
    pub fn new(m: mentor_talk::Model, media: Vec<MediaItem>) -> Self {
        Self {
            id: m.id,
            title: m.title,
            speaker: m.speaker,
            speaker_role: m.speaker_role,
            description: m.description,
            talk_date: m.talk_date,
            video_url: m.video_url,
            is_active: m.is_active,
            order: m.display_order,
            media,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_mentor_talk(req: &CreateMentorTalkRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.text("title", &req.title, 200);
    errors.text("speaker", &req.speaker, 120);
    errors.optional_text("speakerRole", req.speaker_role.as_deref(), 200);
    errors.optional_text("description", req.description.as_deref(), 10_000);
    errors.link("videoUrl", req.video_url.as_deref());
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}

pub fn validate_update_mentor_talk(req: &UpdateMentorTalkRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref title) = req.title {
        errors.text("title", title, 200);
    }
    if let Some(ref speaker) = req.speaker {
        errors.text("speaker", speaker, 120);
    }
    errors.optional_text("speakerRole", patched(&req.speaker_role), 200);
    errors.optional_text("description", patched(&req.description), 10_000);
    errors.link("videoUrl", patched(&req.video_url));
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}
