use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::MediaItem;
use super::shared::{FieldErrors, double_option, patched};
use crate::entity::testimonial;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonialRequest {
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub quote: String,
    #[schema(minimum = 1, maximum = 5)]
    pub rating: Option<i32>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonialRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub company: Option<Option<String>>,
    pub quote: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>, minimum = 1, maximum = 5)]
    pub rating: Option<Option<i32>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
    pub media_ids: Option<Vec<i32>>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialResponse {
    pub id: i32,
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub quote: String,
    pub rating: Option<i32>,
    pub is_active: bool,
    pub order: i32,
    pub media: Vec<MediaItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TestimonialResponse {
    pub fn new(m: testimonial::Model, media: Vec<MediaItem>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            role: m.role,
            company: m.company,
            quote: m.quote,
            rating: m.rating,
            is_active: m.is_active,
            order: m.display_order,
            media,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn check_rating(errors: &mut FieldErrors, rating: Option<i32>) {
    if let Some(rating) = rating
        && !(1..=5).contains(&rating)
    {
        errors.add("rating", "must be between 1 and 5");
    }
}

pub fn validate_create_testimonial(req: &CreateTestimonialRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.text("name", &req.name, 120);
    errors.optional_text("role", req.role.as_deref(), 120);
    errors.optional_text("company", req.company.as_deref(), 120);
    errors.text("quote", &req.quote, 2000);
    check_rating(&mut errors, req.rating);
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}

pub fn validate_update_testimonial(req: &UpdateTestimonialRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if let Some(ref name) = req.name {
        errors.text("name", name, 120);
    }
    errors.optional_text("role", patched(&req.role), 120);
    errors.optional_text("company", patched(&req.company), 120);
    if let Some(ref quote) = req.quote {
        errors.text("quote", quote, 2000);
    }
    check_rating(&mut errors, req.rating.flatten());
    errors.order("order", req.order);
    errors.media_ids("mediaIds", req.media_ids.as_deref());
    errors.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_must_be_one_to_five() {
        let req: CreateTestimonialRequest =
            serde_json::from_str(r#"{"name": "Ada", "quote": "Great", "rating": 6}"#).unwrap();
        assert!(validate_create_testimonial(&req).is_err());

        let req: UpdateTestimonialRequest = serde_json::from_str(r#"{"rating": null}"#).unwrap();
        assert_eq!(req.rating, Some(None));
        assert!(validate_update_testimonial(&req).is_ok());
    }
}
