use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::program::*;
use crate::models::shared::PublishRequest;
use crate::services::ProgramService;
use crate::state::AppState;

fn service(state: &AppState) -> Result<ProgramService<'_>, AppError> {
    Ok(ProgramService::new(state.db()?, &state.media))
}

#[utoipa::path(
    get,
    path = "/api/v1/programs/public",
    tag = "Programs",
    operation_id = "listPublicPrograms",
    summary = "List published programs",
    description = "Active programs in display order with their media. Empty when the database is unavailable.",
    responses(
        (status = 200, description = "Published programs", body = Vec<ProgramResponse>),
        (status = 500, description = "Configuration error (CONFIGURATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn public_programs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProgramResponse>>, AppError> {
    let programs = degrade(async { service(&state)?.public().await }.await, "programs.public")?;
    Ok(Json(programs))
}

#[utoipa::path(
    get,
    path = "/api/v1/programs",
    tag = "Programs",
    operation_id = "listPrograms",
    summary = "List all programs",
    description = "Every program, active or not, in display order.",
    responses(
        (status = 200, description = "All programs", body = Vec<ProgramResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_programs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProgramResponse>>, AppError> {
    let programs = degrade(async { service(&state)?.list_all().await }.await, "programs.list")?;
    Ok(Json(programs))
}

#[utoipa::path(
    get,
    path = "/api/v1/programs/{id}",
    tag = "Programs",
    operation_id = "getProgram",
    summary = "Get a program by ID",
    params(("id" = i32, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program details", body = ProgramResponse),
        (status = 404, description = "Program not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_program(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProgramResponse>, AppError> {
    Ok(Json(service(&state)?.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/programs",
    tag = "Programs",
    operation_id = "createProgram",
    summary = "Create a program",
    description = "Creates a program. Media ids that cannot be resolved are skipped. Returns all programs.",
    request_body = CreateProgramRequest,
    responses(
        (status = 201, description = "Program created", body = Vec<ProgramResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, title = %payload.title))]
pub async fn create_program(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProgramRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_program(&payload)?;
    let programs = service(&state)?;
    programs.create(payload).await?;
    Ok((StatusCode::CREATED, Json(programs.list_all().await?)))
}

#[utoipa::path(
    put,
    path = "/api/v1/programs/{id}",
    tag = "Programs",
    operation_id = "updateProgram",
    summary = "Update a program",
    description = "Updates the provided fields. `mediaIds` replaces the media list when present. Returns all programs.",
    params(("id" = i32, Path, description = "Program ID")),
    request_body = UpdateProgramRequest,
    responses(
        (status = 200, description = "Program updated", body = Vec<ProgramResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Program not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, id))]
pub async fn update_program(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateProgramRequest>,
) -> Result<Json<Vec<ProgramResponse>>, AppError> {
    validate_update_program(&payload)?;
    let programs = service(&state)?;
    programs.update(id, payload).await?;
    Ok(Json(programs.list_all().await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/programs/{id}/publish",
    tag = "Programs",
    operation_id = "publishProgram",
    summary = "Publish or unpublish a program",
    description = "Only active programs appear in the public listing. Returns all programs.",
    params(("id" = i32, Path, description = "Program ID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Program updated", body = Vec<ProgramResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Program not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, id, is_active = payload.is_active))]
pub async fn publish_program(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PublishRequest>,
) -> Result<Json<Vec<ProgramResponse>>, AppError> {
    let programs = service(&state)?;
    programs.set_published(id, payload.is_active).await?;
    Ok(Json(programs.list_all().await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/programs/{id}",
    tag = "Programs",
    operation_id = "deleteProgram",
    summary = "Delete a program",
    description = "Deletes the program and its media associations. Registry assets are kept. Returns the remaining programs.",
    params(("id" = i32, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program deleted", body = Vec<ProgramResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Program not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user = %auth_user.username, id))]
pub async fn delete_program(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ProgramResponse>>, AppError> {
    let programs = service(&state)?;
    programs.delete(id).await?;
    Ok(Json(programs.list_all().await?))
}
