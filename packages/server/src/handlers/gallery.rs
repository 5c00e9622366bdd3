use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::extractors::json::AppJson;
use crate::models::gallery::*;
use crate::models::shared::PublishRequest;
use crate::services::GalleryService;
use crate::state::AppState;

fn service(state: &AppState) -> Result<GalleryService<'_>, AppError> {
    Ok(GalleryService::new(state.db()?, &state.media))
}

#[utoipa::path(
    get,
    path = "/api/v1/event-gallery/public",
    tag = "Event Gallery",
    operation_id = "listPublicGalleryItems",
    summary = "List published gallery items",
    description = "Active gallery items in display order with their media, optionally for one event. Empty when the database is unavailable.",
    params(GalleryPublicQuery),
    responses(
        (status = 200, description = "Published gallery items", body = Vec<GalleryItemResponse>),
        (status = 500, description = "Configuration error (CONFIGURATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(event_id = ?query.event_id))]
pub async fn public_gallery_items(
    State(state): State<AppState>,
    Query(query): Query<GalleryPublicQuery>,
) -> Result<Json<Vec<GalleryItemResponse>>, AppError> {
    let gallery_items = degrade(
        async { service(&state)?.public(query.event_id).await }.await,
        "event-gallery.public",
    )?;
    Ok(Json(gallery_items))
}

#[utoipa::path(
    get,
    path = "/api/v1/event-gallery",
    tag = "Event Gallery",
    operation_id = "listGalleryItems",
    summary = "List all gallery items",
    description = "Every gallery item, active or not, in display order.",
    responses(
        (status = 200, description = "All gallery items", body = Vec<GalleryItemResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_gallery_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryItemResponse>>, AppError> {
    let gallery_items = degrade(async { service(&state)?.list_all().await }.await, "event-gallery.list")?;
    Ok(Json(gallery_items))
}

#[utoipa::path(
    get,
    path = "/api/v1/event-gallery/{id}",
    tag = "Event Gallery",
    operation_id = "getGalleryItem",
    summary = "Get a gallery item by ID",
    params(("id" = i32, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Gallery item details", body = GalleryItemResponse),
        (status = 404, description = "Gallery item not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GalleryItemResponse>, AppError> {
    Ok(Json(service(&state)?.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/event-gallery",
    tag = "Event Gallery",
    operation_id = "createGalleryItem",
    summary = "Create a gallery item",
    description = "Creates a gallery item. Media ids that cannot be resolved are skipped. Returns all gallery items.",
    request_body = CreateGalleryItemRequest,
    responses(
        (status = 201, description = "Gallery item created", body = Vec<GalleryItemResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_gallery_item(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateGalleryItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_gallery_item(&payload)?;
    let gallery_items = service(&state)?;
    gallery_items.create(payload).await?;
    Ok((StatusCode::CREATED, Json(gallery_items.list_all().await?)))
}

#[utoipa::path(
    put,
    path = "/api/v1/event-gallery/{id}",
    tag = "Event Gallery",
    operation_id = "updateGalleryItem",
    summary = "Update a gallery item",
    description = "Updates the provided fields. `mediaIds` replaces the media list when present. Returns all gallery items.",
    params(("id" = i32, Path, description = "Gallery item ID")),
    request_body = UpdateGalleryItemRequest,
    responses(
        (status = 200, description = "Gallery item updated", body = Vec<GalleryItemResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Gallery item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateGalleryItemRequest>,
) -> Result<Json<Vec<GalleryItemResponse>>, AppError> {
    validate_update_gallery_item(&payload)?;
    let gallery_items = service(&state)?;
    gallery_items.update(id, payload).await?;
    Ok(Json(gallery_items.list_all().await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/event-gallery/{id}/publish",
    tag = "Event Gallery",
    operation_id = "publishGalleryItem",
    summary = "Publish or unpublish a gallery item",
    description = "Only active gallery items appear in the public listing. Returns all gallery items.",
    params(("id" = i32, Path, description = "Gallery item ID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Gallery item updated", body = Vec<GalleryItemResponse>),
        (status = 404, description = "Gallery item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id, is_active = payload.is_active))]
pub async fn publish_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PublishRequest>,
) -> Result<Json<Vec<GalleryItemResponse>>, AppError> {
    let gallery_items = service(&state)?;
    gallery_items.set_published(id, payload.is_active).await?;
    Ok(Json(gallery_items.list_all().await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/event-gallery/{id}",
    tag = "Event Gallery",
    operation_id = "deleteGalleryItem",
    summary = "Delete a gallery item",
    description = "Deletes the gallery item and its media associations. Registry assets are kept. Returns the remaining gallery items.",
    params(("id" = i32, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Gallery item deleted", body = Vec<GalleryItemResponse>),
        (status = 404, description = "Gallery item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<GalleryItemResponse>>, AppError> {
    let gallery_items = service(&state)?;
    gallery_items.delete(id).await?;
    Ok(Json(gallery_items.list_all().await?))
}
