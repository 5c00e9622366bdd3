use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaItem;
use super::shared::{FieldErrors, double_option, patched};
use crate::entity::event;
use crate::error::AppError;

/// Maximum number of highlight bullets per event.
pub const MAX_HIGHLIGHTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Upcoming,
    Past,
}

impl EventCategory {
    /// The category an event falls into at `now`.
    pub fn for_date(event_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if event_date < now {
            Self::Past
        } else {
            Self::Upcoming
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Past => "past",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            other => Err(format!("unknown event category: {other}")),
        }
    }
}

/// Fields derived from the event date at read time. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTiming {
    pub is_past: bool,
    pub is_upcoming: bool,
    pub year: i32,
    pub month: String,
}

impl EventTiming {
    pub fn at(event_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let is_past = event_date < now;
        Self {
            is_past,
            is_upcoming: !is_past,
            year: event_date.year(),
            month: event_date.format("%B").to_string(),
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub event_date: DateTime<Utc>,
    /// Derived from `eventDate` when omitted.
    pub category: Option<EventCategory>,
    pub registration_link: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    pub event_date: Option<DateTime<Utc>>,
    pub category: Option<EventCategory>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub registration_link: Option<Option<String>>,
    /// Absent leaves highlights untouched; `[]` removes them all.
    pub highlights: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventPublicQuery {
    /// Only events stored with this category.
    pub category: Option<EventCategory>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub event_date: DateTime<Utc>,
    pub category: String,
    pub registration_link: Option<String>,
    pub highlights: Vec<String>,
    pub is_past: bool,
    pub is_upcoming: bool,
    pub year: i32,
    #[schema(example = "March")]
    pub month: String,
    pub is_active: bool,
    pub order: i32,
    pub media: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventResponse {
    pub fn new(
        m: event::Model,
        highlights: Vec<String>,
        media: Vec<MediaItem>,
        now: DateTime<Utc>,
    ) -> Self {
        let timing = EventTiming::at(m.event_date, now);
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            location: m.location,
            event_date: m.event_date,
            category: m.category,
            registration_link: m.registration_link,
            highlights,
            is_past: timing.is_past,
            is_upcoming: timing.is_upcoming,
            year: timing.year,
            month: timing.month,
            is_active: m.is_active,
            order: m.display_order,
            media,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Trim highlights and drop blank ones, keeping order.
pub fn clean_highlights(highlights: Vec<String>) -> Vec<String> {
    highlights
        .into_iter()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect()
}

fn check_highlights(errors: &mut FieldErrors, highlights: &[String]) {
    if highlights.len() > MAX_HIGHLIGHTS {
        errors.add(
            "highlights",
            format!("must contain at most {MAX_HIGHLIGHTS} items"),
        );
    }
    if highlights.iter().any(|h| h.trim().chars().count() > 500) {
        errors.add("highlights", "items must be at most 500 characters");
    }
}

pub fn validate_create_event(req: &CreateEventRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.text("title", &req.title, 200);
    errors.text("description", &req.description, 10_000);
    errors.optional_text("location", req.location.as_deref(), 300);
    errors.link("registrationLink", req.registration_link.as_deref());
    check_highlights(&mut errors, &req.highlights);
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}

pub fn validate_update_event(req: &UpdateEventRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref title) = req.title {
        errors.text("title", title, 200);
    }
    if let Some(ref description) = req.description {
        errors.text("description", description, 10_000);
    }
    errors.optional_text("location", patched(&req.location), 300);
    errors.link("registrationLink", patched(&req.registration_link));
    if let Some(ref highlights) = req.highlights {
        check_highlights(&mut errors, highlights);
    }
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}
