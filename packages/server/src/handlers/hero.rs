use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::extractors::json::AppJson;
use crate::models::hero::*;
use crate::models::shared::PublishRequest;
use crate::services::HeroService;
use crate::state::AppState;

fn service(state: &AppState) -> Result<HeroService<'_>, AppError> {
    Ok(HeroService::new(state.db()?, &state.media))
}

#[utoipa::path(
    get,
    path = "/api/v1/hero/public",
    tag = "Hero",
    operation_id = "getPublicHero",
    summary = "Get the active hero",
    description = "Returns the active hero with its media, or `null` when none is active or the database is unavailable.",
    responses(
        (status = 200, description = "Active hero or null", body = Option<HeroResponse>),
        (status = 500, description = "Configuration error (CONFIGURATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn public_hero(
    State(state): State<AppState>,
) -> Result<Json<Option<HeroResponse>>, AppError> {
    let hero = degrade(async { service(&state)?.public().await }.await, "hero.public")?;
    Ok(Json(hero))
}

#[utoipa::path(
    get,
    path = "/api/v1/hero",
    tag = "Hero",
    operation_id = "listHeroes",
    summary = "List all heroes",
    description = "Every hero, active or not, in display order.",
    responses(
        (status = 200, description = "All heroes", body = Vec<HeroResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_heroes(
    State(state): State<AppState>,
) -> Result<Json<Vec<HeroResponse>>, AppError> {
    let heroes = degrade(async { service(&state)?.list_all().await }.await, "hero.list")?;
    Ok(Json(heroes))
}

#[utoipa::path(
    get,
    path = "/api/v1/hero/{id}",
    tag = "Hero",
    operation_id = "getHero",
    summary = "Get a hero by ID",
    params(("id" = i32, Path, description = "Hero ID")),
    responses(
        (status = 200, description = "Hero details", body = HeroResponse),
        (status = 404, description = "Hero not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_hero(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<HeroResponse>, AppError> {
    Ok(Json(service(&state)?.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/hero",
    tag = "Hero",
    operation_id = "createHero",
    summary = "Create a hero",
    description = "Creates a hero and deactivates every other one. Media ids that cannot be resolved are skipped. Returns all heroes.",
    request_body = CreateHeroRequest,
    responses(
        (status = 201, description = "Hero created", body = Vec<HeroResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_hero(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateHeroRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_hero(&payload)?;
    let heroes = service(&state)?;
    heroes.create(payload).await?;
    Ok((StatusCode::CREATED, Json(heroes.list_all().await?)))
}

#[utoipa::path(
    put,
    path = "/api/v1/hero/{id}",
    tag = "Hero",
    operation_id = "updateHero",
    summary = "Update a hero",
    description = "Updates the provided fields. `mediaIds` replaces the media list when present. Setting `isActive` to true deactivates the other heroes. Returns all heroes.",
    params(("id" = i32, Path, description = "Hero ID")),
    request_body = UpdateHeroRequest,
    responses(
        (status = 200, description = "Hero updated", body = Vec<HeroResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Hero not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_hero(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateHeroRequest>,
) -> Result<Json<Vec<HeroResponse>>, AppError> {
    validate_update_hero(&payload)?;
    let heroes = service(&state)?;
    heroes.update(id, payload).await?;
    Ok(Json(heroes.list_all().await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/hero/{id}/publish",
    tag = "Hero",
    operation_id = "publishHero",
    summary = "Activate or deactivate a hero",
    description = "Activating a hero deactivates every other one. Returns all heroes.",
    params(("id" = i32, Path, description = "Hero ID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Hero updated", body = Vec<HeroResponse>),
        (status = 404, description = "Hero not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, is_active = payload.is_active))]
pub async fn publish_hero(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PublishRequest>,
) -> Result<Json<Vec<HeroResponse>>, AppError> {
    let heroes = service(&state)?;
    heroes.set_published(id, payload.is_active).await?;
    Ok(Json(heroes.list_all().await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/hero/{id}",
    tag = "Hero",
    operation_id = "deleteHero",
    summary = "Delete a hero",
    description = "Deletes the hero and its media associations. Registry assets are kept. Returns the remaining heroes.",
    params(("id" = i32, Path, description = "Hero ID")),
    responses(
        (status = 200, description = "Hero deleted", body = Vec<HeroResponse>),
        (status = 404, description = "Hero not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_hero(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<HeroResponse>>, AppError> {
    let heroes = service(&state)?;
    heroes.delete(id).await?;
    Ok(Json(heroes.list_all().await?))
}
