use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::extractors::json::AppJson;
use crate::models::team::*;
use crate::models::shared::PublishRequest;
use crate::services::TeamService;
use crate::state::AppState;

fn service(state: &AppState) -> Result<TeamService<'_>, AppError> {
    Ok(TeamService::new(state.db()?, &state.media))
}

#[utoipa::path(
    get,
    path = "/api/v1/team/public",
    tag = "Team",
    operation_id = "listPublicTeamMembers",
    summary = "List published team members",
    description = "Active team members in display order with their media. Empty when the database is unavailable.",
    responses(
        (status = 200, description = "Published team members", body = Vec<TeamMemberResponse>),
        (status = 500, description = "Configuration error (CONFIGURATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn public_team_members(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamMemberResponse>>, AppError> {
    let team_members = degrade(async { service(&state)?.public().await }.await, "team.public")?;
    Ok(Json(team_members))
}

#[utoipa::path(
    get,
    path = "/api/v1/team",
    tag = "Team",
    operation_id = "listTeamMembers",
    summary = "List all team members",
    description = "Every team member, active or not, in display order.",
    responses(
        (status = 200, description = "All team members", body = Vec<TeamMemberResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_team_members(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamMemberResponse>>, AppError> {
    let team_members = degrade(async { service(&state)?.list_all().await }.await, "team.list")?;
    Ok(Json(team_members))
}

#[utoipa::path(
    get,
    path = "/api/v1/team/{id}",
    tag = "Team",
    operation_id = "getTeamMember",
    summary = "Get a team member by ID",
    params(("id" = i32, Path, description = "Team member ID")),
    responses(
        (status = 200, description = "Team member details", body = TeamMemberResponse),
        (status = 404, description = "Team member not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_team_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TeamMemberResponse>, AppError> {
    Ok(Json(service(&state)?.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/team",
    tag = "Team",
    operation_id = "createTeamMember",
    summary = "Create a team member",
    description = "Creates a team member. Media ids that cannot be resolved are skipped. Returns all team members.",
    request_body = CreateTeamMemberRequest,
    responses(
        (status = 201, description = "Team member created", body = Vec<TeamMemberResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_team_member(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTeamMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_team_member(&payload)?;
    let team_members = service(&state)?;
    team_members.create(payload).await?;
    Ok((StatusCode::CREATED, Json(team_members.list_all().await?)))
}

#[utoipa::path(
    put,
    path = "/api/v1/team/{id}",
    tag = "Team",
    operation_id = "updateTeamMember",
    summary = "Update a team member",
    description = "Updates the provided fields. `mediaIds` replaces the media list when present. Returns all team members.",
    params(("id" = i32, Path, description = "Team member ID")),
    request_body = UpdateTeamMemberRequest,
    responses(
        (status = 200, description = "Team member updated", body = Vec<TeamMemberResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Team member not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_team_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateTeamMemberRequest>,
) -> Result<Json<Vec<TeamMemberResponse>>, AppError> {
    validate_update_team_member(&payload)?;
    let team_members = service(&state)?;
    team_members.update(id, payload).await?;
    Ok(Json(team_members.list_all().await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/team/{id}/publish",
    tag = "Team",
    operation_id = "publishTeamMember",
    summary = "Publish or unpublish a team member",
    description = "Only active team members appear in the public listing. Returns all team members.",
    params(("id" = i32, Path, description = "Team member ID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Team member updated", body = Vec<TeamMemberResponse>),
        (status = 404, description = "Team member not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, is_active = payload.is_active))]
pub async fn publish_team_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PublishRequest>,
) -> Result<Json<Vec<TeamMemberResponse>>, AppError> {
    let team_members = service(&state)?;
    team_members.set_published(id, payload.is_active).await?;
    Ok(Json(team_members.list_all().await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/team/{id}",
    tag = "Team",
    operation_id = "deleteTeamMember",
    summary = "Delete a team member",
    description = "Deletes the team member and its media associations. Registry assets are kept. Returns the remaining team members.",
    params(("id" = i32, Path, description = "Team member ID")),
    responses(
        (status = 200, description = "Team member deleted", body = Vec<TeamMemberResponse>),
        (status = 404, description = "Team member not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_team_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<TeamMemberResponse>>, AppError> {
    let team_members = service(&state)?;
    team_members.delete(id).await?;
    Ok(Json(team_members.list_all().await?))
}
