use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::extractors::json::AppJson;
use crate::models::event::*;
use crate::models::shared::PublishRequest;
use crate::services::EventService;
use crate::state::AppState;

fn service(state: &AppState) -> Result<EventService<'_>, AppError> {
    Ok(EventService::new(state.db()?, &state.media))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/public",
    tag = "Events",
    operation_id = "listPublicEvents",
    summary = "List published events",
    description = "Active events in display order with highlights, media and timing fields derived from the current time. `category` filters on the stored category. Empty when the database is unavailable.",
    params(EventPublicQuery),
    responses(
        (status = 200, description = "Published events", body = Vec<EventResponse>),
        (status = 400, description = "Unknown category (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Configuration error (CONFIGURATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(category = ?query.category))]
pub async fn public_events(
    State(state): State<AppState>,
    Query(query): Query<EventPublicQuery>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = degrade(
        async { service(&state)?.public(query.category).await }.await,
        "events.public",
    )?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    operation_id = "listEvents",
    summary = "List all events",
    description = "Every event, active or not, in display order.",
    responses(
        (status = 200, description = "All events", body = Vec<EventResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = degrade(async { service(&state)?.list_all().await }.await, "events.list")?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    operation_id = "getEvent",
    summary = "Get an event by ID",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = EventResponse),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EventResponse>, AppError> {
    Ok(Json(service(&state)?.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    operation_id = "createEvent",
    summary = "Create an event",
    description = "Creates an event. Media ids that cannot be resolved are skipped. Returns all events.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Vec<EventResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_event(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_event(&payload)?;
    let events = service(&state)?;
    events.create(payload).await?;
    Ok((StatusCode::CREATED, Json(events.list_all().await?)))
}

#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    tag = "Events",
    operation_id = "updateEvent",
    summary = "Update an event",
    description = "Updates the provided fields. `mediaIds` replaces the media list when present. Returns all events.",
    params(("id" = i32, Path, description = "Event ID")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = Vec<EventResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateEventRequest>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    validate_update_event(&payload)?;
    let events = service(&state)?;
    events.update(id, payload).await?;
    Ok(Json(events.list_all().await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}/publish",
    tag = "Events",
    operation_id = "publishEvent",
    summary = "Publish or unpublish an event",
    description = "Only active events appear in the public listing. Returns all events.",
    params(("id" = i32, Path, description = "Event ID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Event updated", body = Vec<EventResponse>),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, is_active = payload.is_active))]
pub async fn publish_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PublishRequest>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = service(&state)?;
    events.set_published(id, payload.is_active).await?;
    Ok(Json(events.list_all().await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "Events",
    operation_id = "deleteEvent",
    summary = "Delete an event",
    description = "Deletes the event and its media associations. Registry assets are kept. Returns the remaining events.",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted", body = Vec<EventResponse>),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let events = service(&state)?;
    events.delete(id).await?;
    Ok(Json(events.list_all().await?))
}
