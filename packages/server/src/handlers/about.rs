use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::extractors::json::AppJson;
use crate::models::about::*;
use crate::models::shared::PublishRequest;
use crate::services::AboutService;
use crate::state::AppState;

fn service(state: &AppState) -> Result<AboutService<'_>, AppError> {
    Ok(AboutService::new(state.db()?, &state.media))
}

#[utoipa::path(
    get,
    path = "/api/v1/about/public",
    tag = "About",
    operation_id = "getPublicAbout",
    summary = "Get the active about entry",
    description = "Returns the active about entry with its media, or `null` when none is active or the database is unavailable.",
    responses(
        (status = 200, description = "Active about entry or null", body = Option<AboutResponse>),
        (status = 500, description = "Configuration error (CONFIGURATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn public_about(
    State(state): State<AppState>,
) -> Result<Json<Option<AboutResponse>>, AppError> {
    let about = degrade(async { service(&state)?.public().await }.await, "about.public")?;
    Ok(Json(about))
}

#[utoipa::path(
    get,
    path = "/api/v1/about",
    tag = "About",
    operation_id = "listAboutEntries",
    summary = "List all about entries",
    description = "Every about entry, active or not, in display order.",
    responses(
        (status = 200, description = "All about entries", body = Vec<AboutResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_about_entries(
    State(state): State<AppState>,
) -> Result<Json<Vec<AboutResponse>>, AppError> {
    let about_entries = degrade(async { service(&state)?.list_all().await }.await, "about.list")?;
    Ok(Json(about_entries))
}

#[utoipa::path(
    get,
    path = "/api/v1/about/{id}",
    tag = "About",
    operation_id = "getAbout",
    summary = "Get an about entry by ID",
    params(("id" = i32, Path, description = "About entry ID")),
    responses(
        (status = 200, description = "About entry details", body = AboutResponse),
        (status = 404, description = "About entry not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_about(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AboutResponse>, AppError> {
    Ok(Json(service(&state)?.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/about",
    tag = "About",
    operation_id = "createAbout",
    summary = "Create an about entry",
    description = "Creates an about entry and deactivates every other one. Media ids that cannot be resolved are skipped. Returns all about entries.",
    request_body = CreateAboutRequest,
    responses(
        (status = 201, description = "About entry created", body = Vec<AboutResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_about(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAboutRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_about(&payload)?;
    let about_entries = service(&state)?;
    about_entries.create(payload).await?;
    Ok((StatusCode::CREATED, Json(about_entries.list_all().await?)))
}

#[utoipa::path(
    put,
    path = "/api/v1/about/{id}",
    tag = "About",
    operation_id = "updateAbout",
    summary = "Update an about entry",
    description = "Updates the provided fields. `mediaIds` replaces the media list when present. Setting `isActive` to true deactivates the others. Returns all about entries.",
    params(("id" = i32, Path, description = "About entry ID")),
    request_body = UpdateAboutRequest,
    responses(
        (status = 200, description = "About entry updated", body = Vec<AboutResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "About entry not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_about(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateAboutRequest>,
) -> Result<Json<Vec<AboutResponse>>, AppError> {
    validate_update_about(&payload)?;
    let about_entries = service(&state)?;
    about_entries.update(id, payload).await?;
    Ok(Json(about_entries.list_all().await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/about/{id}/publish",
    tag = "About",
    operation_id = "publishAbout",
    summary = "Activate or deactivate an about entry",
    description = "Activating an about entry deactivates every other one. Returns all about entries.",
    params(("id" = i32, Path, description = "About entry ID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "About entry updated", body = Vec<AboutResponse>),
        (status = 404, description = "About entry not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, is_active = payload.is_active))]
pub async fn publish_about(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PublishRequest>,
) -> Result<Json<Vec<AboutResponse>>, AppError> {
    let about_entries = service(&state)?;
    about_entries.set_published(id, payload.is_active).await?;
    Ok(Json(about_entries.list_all().await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/about/{id}",
    tag = "About",
    operation_id = "deleteAbout",
    summary = "Delete an about entry",
    description = "Deletes the about entry and its media associations. Registry assets are kept. Returns the remaining about entries.",
    params(("id" = i32, Path, description = "About entry ID")),
    responses(
        (status = 200, description = "About entry deleted", body = Vec<AboutResponse>),
        (status = 404, description = "About entry not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_about(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<AboutResponse>>, AppError> {
    let about_entries = service(&state)?;
    about_entries.delete(id).await?;
    Ok(Json(about_entries.list_all().await?))
}
