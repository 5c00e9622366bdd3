use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::extractors::json::AppJson;
use crate::models::mentor_talk::*;
use crate::models::shared::PublishRequest;
use crate::services::MentorTalkService;
use crate::state::AppState;

fn service(state: &AppState) -> Result<MentorTalkService<'_>, AppError> {
    Ok(MentorTalkService::new(state.db()?, &state.media))
}

#[utoipa::path(
    get,
    path = "/api/v1/mentor-talks/public",
    tag = "Mentor Talks",
    operation_id = "listPublicMentorTalks",
    summary = "List published mentor talks",
    description = "Active mentor talks in display order with their media. Empty when the database is unavailable.",
    responses(
        (status = 200, description = "Published mentor talks", body = Vec<MentorTalkResponse>),
        (status = 500, description = "Configuration error (CONFIGURATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn public_mentor_talks(
    State(state): State<AppState>,
) -> Result<Json<Vec<MentorTalkResponse>>, AppError> {
    let mentor_talks = degrade(async { service(&state)?.public().await }.await, "mentor-talks.public")?;
    Ok(Json(mentor_talks))
}

#[utoipa::path(
    get,
    path = "/api/v1/mentor-talks",
    tag = "Mentor Talks",
    operation_id = "listMentorTalks",
    summary = "List all mentor talks",
    description = "Every mentor talk, active or not, in display order.",
    responses(
        (status = 200, description = "All mentor talks", body = Vec<MentorTalkResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_mentor_talks(
    State(state): State<AppState>,
) -> Result<Json<Vec<MentorTalkResponse>>, AppError> {
    let mentor_talks = degrade(async { service(&state)?.list_all().await }.await, "mentor-talks.list")?;
    Ok(Json(mentor_talks))
}

#[utoipa::path(
    get,
    path = "/api/v1/mentor-talks/{id}",
    tag = "Mentor Talks",
    operation_id = "getMentorTalk",
    summary = "Get a mentor talk by ID",
    params(("id" = i32, Path, description = "Mentor talk ID")),
    responses(
        (status = 200, description = "Mentor talk details", body = MentorTalkResponse),
        (status = 404, description = "Mentor talk not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_mentor_talk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MentorTalkResponse>, AppError> {
    Ok(Json(service(&state)?.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/mentor-talks",
    tag = "Mentor Talks",
    operation_id = "createMentorTalk",
    summary = "Create a mentor talk",
    description = "Creates a mentor talk. Media ids that cannot be resolved are skipped. Returns all mentor talks.",
    request_body = CreateMentorTalkRequest,
    responses(
        (status = 201, description = "Mentor talk created", body = Vec<MentorTalkResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_mentor_talk(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateMentorTalkRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_mentor_talk(&payload)?;
    let mentor_talks = service(&state)?;
    mentor_talks.create(payload).await?;
    Ok((StatusCode::CREATED, Json(mentor_talks.list_all().await?)))
}

#[utoipa::path(
    put,
    path = "/api/v1/mentor-talks/{id}",
    tag = "Mentor Talks",
    operation_id = "updateMentorTalk",
    summary = "Update a mentor talk",
    description = "Updates the provided fields. `mediaIds` replaces the media list when present. Returns all mentor talks.",
    params(("id" = i32, Path, description = "Mentor talk ID")),
    request_body = UpdateMentorTalkRequest,
    responses(
        (status = 200, description = "Mentor talk updated", body = Vec<MentorTalkResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Mentor talk not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_mentor_talk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateMentorTalkRequest>,
) -> Result<Json<Vec<MentorTalkResponse>>, AppError> {
    validate_update_mentor_talk(&payload)?;
    let mentor_talks = service(&state)?;
    mentor_talks.update(id, payload).await?;
    Ok(Json(mentor_talks.list_all().await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/mentor-talks/{id}/publish",
    tag = "Mentor Talks",
    operation_id = "publishMentorTalk",
    summary = "Publish or unpublish a mentor talk",
    description = "Only active mentor talks appear in the public listing. Returns all mentor talks.",
    params(("id" = i32, Path, description = "Mentor talk ID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Mentor talk updated", body = Vec<MentorTalkResponse>),
        (status = 404, description = "Mentor talk not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, is_active = payload.is_active))]
pub async fn publish_mentor_talk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PublishRequest>,
) -> Result<Json<Vec<MentorTalkResponse>>, AppError> {
    let mentor_talks = service(&state)?;
    mentor_talks.set_published(id, payload.is_active).await?;
    Ok(Json(mentor_talks.list_all().await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/mentor-talks/{id}",
    tag = "Mentor Talks",
    operation_id = "deleteMentorTalk",
    summary = "Delete a mentor talk",
    description = "Deletes the mentor talk and its media associations. Registry assets are kept. Returns the remaining mentor talks.",
    params(("id" = i32, Path, description = "Mentor talk ID")),
    responses(
        (status = 200, description = "Mentor talk deleted", body = Vec<MentorTalkResponse>),
        (status = 404, description = "Mentor talk not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_mentor_talk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<MentorTalkResponse>>, AppError> {
    let mentor_talks = service(&state)?;
    mentor_talks.delete(id).await?;
    Ok(Json(mentor_talks.list_all().await?))
}
