use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::media::{MediaAssetChanges, NewMediaAsset};
use crate::models::media::{
    MediaAssetView, RegisterMediaRequest, UpdateMediaRequest, validate_register_media,
    validate_update_media,
};
use crate::state::AppState;
use crate::utils::filename::{
    is_supported_media_type, resolve_content_type, validate_upload_filename,
};

/// Leaves room for the multipart framing around a maximum-size file.
pub fn media_upload_body_limit(max_upload_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_upload_size.saturating_add(64 * 1024))
}

#[utoipa::path(
    get,
    path = "/api/v1/media",
    tag = "Media",
    operation_id = "listMedia",
    summary = "List media assets",
    description = "Every registered asset, newest first. Empty when the database is unavailable.",
    responses(
        (status = 200, description = "All assets", body = Vec<MediaAssetView>),
        (status = 500, description = "Configuration error (CONFIGURATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_media(
    State(state): State<AppState>,
) -> Result<Json<Vec<MediaAssetView>>, AppError> {
    let assets = degrade(
        async {
            let db = state.db()?;
            state
                .media
                .list_all(db)
                .await?
                .into_iter()
                .map(|asset| state.media.view(asset))
                .collect::<Result<Vec<_>, _>>()
        }
        .await,
        "media.list",
    )?;
    Ok(Json(assets))
}

#[utoipa::path(
    get,
    path = "/api/v1/media/{id}",
    tag = "Media",
    operation_id = "getMedia",
    summary = "Get a media asset",
    params(("id" = i32, Path, description = "Media asset ID")),
    responses(
        (status = 200, description = "Asset", body = MediaAssetView),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MediaAssetView>, AppError> {
    let asset = state.media.get(state.db()?, id).await?;
    Ok(Json(state.media.view(asset)?))
}

#[utoipa::path(
    post,
    path = "/api/v1/media",
    tag = "Media",
    operation_id = "registerMedia",
    summary = "Register a media asset",
    description = "Records an asset that already lives in storage. Without `storagePath` \
        the asset has no public URL until one is set.",
    request_body = RegisterMediaRequest,
    responses(
        (status = 201, description = "Asset registered", body = MediaAssetView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 503, description = "Database not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, name = %payload.name))]
pub async fn register_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterMediaRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_media(&payload)?;

    let asset = state
        .media
        .register(
            state.db()?,
            NewMediaAsset {
                name: payload.name,
                mime_type: payload.mime_type,
                storage_backend: payload.storage_backend,
                storage_path: payload.storage_path,
                archive_ref: payload.archive_ref,
                size: payload.size,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(state.media.view(asset)?)))
}

#[utoipa::path(
    post,
    path = "/api/v1/media/upload",
    tag = "Media",
    operation_id = "uploadMedia",
    summary = "Upload a media file",
    description = "Stores the `file` multipart field in object storage and registers it. \
        An optional `name` field overrides the display name. Only images and videos are accepted.",
    request_body(content_type = "multipart/form-data", description = "File upload with optional display name"),
    responses(
        (status = 201, description = "Asset uploaded", body = MediaAssetView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 502, description = "Object storage failed (STORAGE_ERROR)", body = ErrorBody),
        (status = 503, description = "Storage not configured (NOT_CONFIGURED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, multipart), fields(user = %auth_user.username))]
pub async fn upload_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let db = state.db()?;
    let max_size = state.config.storage.max_upload_size;

    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut display_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
                let declared = field.content_type().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                if data.len() > max_size {
                    return Err(AppError::Validation(format!(
                        "File exceeds the {max_size} byte upload limit"
                    )));
                }
                file = Some((file_name, declared, data.to_vec()));
            }
            Some("name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read name: {e}")))?;
                if !text.trim().is_empty() {
                    display_name = Some(text.trim().to_string());
                }
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let (file_name, declared, data) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".into()));
    }

    let file_name = validate_upload_filename(&file_name)?;
    let content_type = resolve_content_type(file_name, declared.as_deref());
    if !is_supported_media_type(&content_type) {
        return Err(AppError::Validation(format!(
            "Unsupported media type '{content_type}': only images and videos can be uploaded"
        )));
    }

    let asset = state
        .media
        .upload(db, file_name, &content_type, data, display_name)
        .await?;

    Ok((StatusCode::CREATED, Json(state.media.view(asset)?)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/media/{id}",
    tag = "Media",
    operation_id = "updateMedia",
    summary = "Update a media asset",
    description = "Renames the asset or sets its storage path. `null` clears a nullable field.",
    params(("id" = i32, Path, description = "Media asset ID")),
    request_body = UpdateMediaRequest,
    responses(
        (status = 200, description = "Asset updated", body = MediaAssetView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user = %auth_user.username, id))]
pub async fn update_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateMediaRequest>,
) -> Result<Json<MediaAssetView>, AppError> {
    validate_update_media(&payload)?;

    let asset = state
        .media
        .update(
            state.db()?,
            id,
            MediaAssetChanges {
                name: payload.name,
                storage_path: payload.storage_path,
                archive_ref: payload.archive_ref,
            },
        )
        .await?;

    Ok(Json(state.media.view(asset)?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/media/{id}",
    tag = "Media",
    operation_id = "deleteMedia",
    summary = "Delete a media asset",
    description = "Removes the registry row and, best effort, the stored blob. Content that \
        referenced the asset stops showing it. Returns the deleted asset.",
    params(("id" = i32, Path, description = "Media asset ID")),
    responses(
        (status = 200, description = "Asset deleted", body = MediaAssetView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Asset not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user = %auth_user.username, id))]
pub async fn delete_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MediaAssetView>, AppError> {
    Ok(Json(state.media.delete_asset(state.db()?, id).await?))
}
