use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::founder::*;
use crate::models::shared::PublishRequest;
use crate::services::FounderService;
use crate::state::AppState;

fn service(state: &AppState) -> Result<FounderService<'_>, AppError> {
    Ok(FounderService::new(state.db()?, &state.media))
}

#[utoipa::path(
    get,
    path = "/api/v1/founders/public",
    tag = "Founders",
    operation_id = "listPublicFounders",
    summary = "List published founders",
    description = "Active founders in display order with their media. Empty when the database is unavailable.",
    responses(
        (status = 200, description = "Published founders", body = Vec<FounderResponse>),
        (status = 500, description = "Configuration error (CONFIGURATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn public_founders(
    State(state): State<AppState>,
) -> Result<Json<Vec<FounderResponse>>, AppError> {
    let founders = degrade(async { service(&state)?.public().await }.await, "founders.public")?;
    Ok(Json(founders))
}

#[utoipa::path(
    get,
    path = "/api/v1/founders",
    tag = "Founders",
    operation_id = "listFounders",
    summary = "List all founders",
    description = "Every founder, active or not, in display order.",
    responses(
        (status = 200, description = "All founders", body = Vec<FounderResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_founders(
    State(state): State<AppState>,
) -> Result<Json<Vec<FounderResponse>>, AppError> {
    let founders = degrade(async { service(&state)?.list_all().await }.await, "founders.list")?;
    Ok(Json(founders))
}

#[utoipa::path(
    get,
    path = "/api/v1/founders/{id}",
    tag = "Founders",
    operation_id = "getFounder",
    summary = "Get a founder by ID",
    params(("id" = i32, Path, description = "Founder ID")),
    responses(
        (status = 200, description = "Founder details", body = FounderResponse),
        (status = 404, description = "Founder not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_founder(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FounderResponse>, AppError> {
    Ok(Json(service(&state)?.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/founders",
    tag = "Founders",
    operation_id = "createFounder",
    summary = "Create a founder",
    description = "Creates a founder. Media ids that cannot be resolved are skipped. Returns all founders.",
    request_body = CreateFounderRequest,
    responses(
        (status = 201, description = "Founder created", body = Vec<FounderResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, name = %payload.name))]
pub async fn create_founder(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateFounderRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_founder(&payload)?;
    let founders = service(&state)?;
    founders.create(payload).await?;
    Ok((StatusCode::CREATED, Json(founders.list_all().await?)))
}

#[utoipa::path(
    put,
    path = "/api/v1/founders/{id}",
    tag = "Founders",
    operation_id = "updateFounder",
    summary = "Update a founder",
    description = "Updates the provided fields. `mediaIds` replaces the media list when present. Returns all founders.",
    params(("id" = i32, Path, description = "Founder ID")),
    request_body = UpdateFounderRequest,
    responses(
        (status = 200, description = "Founder updated", body = Vec<FounderResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Founder not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, id))]
pub async fn update_founder(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateFounderRequest>,
) -> Result<Json<Vec<FounderResponse>>, AppError> {
    validate_update_founder(&payload)?;
    let founders = service(&state)?;
    founders.update(id, payload).await?;
    Ok(Json(founders.list_all().await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/founders/{id}/publish",
    tag = "Founders",
    operation_id = "publishFounder",
    summary = "Publish or unpublish a founder",
    description = "Only active founders appear in the public listing. Returns all founders.",
    params(("id" = i32, Path, description = "Founder ID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Founder updated", body = Vec<FounderResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Founder not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, id, is_active = payload.is_active))]
pub async fn publish_founder(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PublishRequest>,
) -> Result<Json<Vec<FounderResponse>>, AppError> {
    let founders = service(&state)?;
    founders.set_published(id, payload.is_active).await?;
    Ok(Json(founders.list_all().await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/founders/{id}",
    tag = "Founders",
    operation_id = "deleteFounder",
    summary = "Delete a founder",
    description = "Deletes the founder and its media associations. Registry assets are kept. Returns the remaining founders.",
    params(("id" = i32, Path, description = "Founder ID")),
    responses(
        (status = 200, description = "Founder deleted", body = Vec<FounderResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Founder not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user = %auth_user.username, id))]
pub async fn delete_founder(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<FounderResponse>>, AppError> {
    let founders = service(&state)?;
    founders.delete(id).await?;
    Ok(Json(founders.list_all().await?))
}
