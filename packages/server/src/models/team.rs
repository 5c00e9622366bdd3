use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaItem;
use super::shared::{FieldErrors, double_option, patched};
use crate::entity::team_member;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMemberRequest {
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamMemberRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub linkedin_url: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberResponse {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub media: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamMemberResponse {
    pub fn new(m: team_member::Model, media: Vec<MediaItem>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            role: m.role,
            bio: m.bio,
            linkedin_url: m.linkedin_url,
            is_active: m.is_active,
            order: m.display_order,
            media,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_team_member(req: &CreateTeamMemberRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.text("name", &req.name, 120);
    errors.text("role", &req.role, 120);
    errors.optional_text("bio", req.bio.as_deref(), 5000);
    errors.link("linkedinUrl", req.linkedin_url.as_deref());
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}

pub fn validate_update_team_member(req: &UpdateTeamMemberRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref name) = req.name {
        errors.text("name", name, 120);
    }
    if let Some(ref role) = req.role {
        errors.text("role", role, 120);
    }
    errors.optional_text("bio", patched(&req.bio), 5000);
    errors.link("linkedinUrl", patched(&req.linkedin_url));
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}
