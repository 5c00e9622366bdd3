use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::config::REPORTED_SETTINGS;
use crate::error::AppError;
use crate::models::health::{DatabaseHealth, EnvReport, EnvSetting, HealthResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Liveness",
    responses((status = 200, description = "Process is up", body = HealthResponse)),
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[utoipa::path(
    get,
    path = "/health/db",
    tag = "Health",
    operation_id = "healthDb",
    summary = "Database connectivity",
    responses(
        (status = 200, description = "Database reachable", body = DatabaseHealth),
        (status = 503, description = "Database unreachable or not configured", body = DatabaseHealth),
    ),
)]
#[instrument(skip(state))]
pub async fn health_db(State(state): State<AppState>) -> impl IntoResponse {
    match state.gateway.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(DatabaseHealth {
                status: "ok",
                message: None,
            }),
        ),
        Err(AppError::NotConfigured(msg)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(DatabaseHealth {
                status: "unconfigured",
                message: Some(msg),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = ?e, "Database probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(DatabaseHealth {
                    status: "error",
                    message: Some("Database probe failed".into()),
                }),
            )
        }
    }
}

#[utoipa::path(
    get,
    path = "/health/env",
    tag = "Health",
    operation_id = "healthEnv",
    summary = "Configuration presence",
    description = "Reports which settings are present. Values are never included.",
    responses((status = 200, description = "Presence report", body = EnvReport)),
)]
pub async fn health_env(State(state): State<AppState>) -> Json<EnvReport> {
    let settings = REPORTED_SETTINGS
        .iter()
        .map(|&name| EnvSetting {
            name,
            set: state.config.is_set(name),
        })
        .collect();
    Json(EnvReport { settings })
}
