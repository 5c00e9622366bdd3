use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::testimonial::*;
use crate::models::shared::PublishRequest;
use crate::services::TestimonialService;
use crate::state::AppState;

fn service(state: &AppState) -> Result<TestimonialService<'_>, AppError> {
    Ok(TestimonialService::new(state.db()?, &state.media))
}

#[utoipa::path(
    get,
    path = "/api/v1/testimonials/public",
    tag = "Testimonials",
    operation_id = "listPublicTestimonials",
    summary = "List published testimonials",
    description = "Active testimonials in display order with their media. Empty when the database is unavailable.",
    responses(
        (status = 200, description = "Published testimonials", body = Vec<TestimonialResponse>),
        (status = 500, description = "Configuration error (CONFIGURATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn public_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    let testimonials = degrade(async { service(&state)?.public().await }.await, "testimonials.public")?;
    Ok(Json(testimonials))
}

#[utoipa::path(
    get,
    path = "/api/v1/testimonials",
    tag = "Testimonials",
    operation_id = "listTestimonials",
    summary = "List all testimonials",
    description = "Every testimonial, active or not, in display order.",
    responses(
        (status = 200, description = "All testimonials", body = Vec<TestimonialResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    let testimonials = degrade(async { service(&state)?.list_all().await }.await, "testimonials.list")?;
    Ok(Json(testimonials))
}

#[utoipa::path(
    get,
    path = "/api/v1/testimonials/{id}",
    tag = "Testimonials",
    operation_id = "getTestimonial",
    summary = "Get a testimonial by ID",
    params(("id" = i32, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Testimonial details", body = TestimonialResponse),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_testimonial(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TestimonialResponse>, AppError> {
    Ok(Json(service(&state)?.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/testimonials",
    tag = "Testimonials",
    operation_id = "createTestimonial",
    summary = "Create a testimonial",
    description = "Creates a testimonial. Media ids that cannot be resolved are skipped. Returns all testimonials.",
    request_body = CreateTestimonialRequest,
    responses(
        (status = 201, description = "Testimonial created", body = Vec<TestimonialResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, name = %payload.name))]
pub async fn create_testimonial(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTestimonialRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_testimonial(&payload)?;
    let testimonials = service(&state)?;
    testimonials.create(payload).await?;
    Ok((StatusCode::CREATED, Json(testimonials.list_all().await?)))
}

#[utoipa::path(
    put,
    path = "/api/v1/testimonials/{id}",
    tag = "Testimonials",
    operation_id = "updateTestimonial",
    summary = "Update a testimonial",
    description = "Updates the provided fields. `mediaIds` replaces the media list when present. Returns all testimonials.",
    params(("id" = i32, Path, description = "Testimonial ID")),
    request_body = UpdateTestimonialRequest,
    responses(
        (status = 200, description = "Testimonial updated", body = Vec<TestimonialResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, id))]
pub async fn update_testimonial(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateTestimonialRequest>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    validate_update_testimonial(&payload)?;
    let testimonials = service(&state)?;
    testimonials.update(id, payload).await?;
    Ok(Json(testimonials.list_all().await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/testimonials/{id}/publish",
    tag = "Testimonials",
    operation_id = "publishTestimonial",
    summary = "Publish or unpublish a testimonial",
    description = "Only active testimonials appear in the public listing. Returns all testimonials.",
    params(("id" = i32, Path, description = "Testimonial ID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Testimonial updated", body = Vec<TestimonialResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, id, is_active = payload.is_active))]
pub async fn publish_testimonial(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PublishRequest>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    let testimonials = service(&state)?;
    testimonials.set_published(id, payload.is_active).await?;
    Ok(Json(testimonials.list_all().await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/testimonials/{id}",
    tag = "Testimonials",
    operation_id = "deleteTestimonial",
    summary = "Delete a testimonial",
    description = "Deletes the testimonial and its media associations. Registry assets are kept. Returns the remaining testimonials.",
    params(("id" = i32, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Testimonial deleted", body = Vec<TestimonialResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user = %auth_user.username, id))]
pub async fn delete_testimonial(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    let testimonials = service(&state)?;
    testimonials.delete(id).await?;
    Ok(Json(testimonials.list_all().await?))
}
