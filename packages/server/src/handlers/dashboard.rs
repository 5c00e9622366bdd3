use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody, degrade};
use crate::models::dashboard::{ActivityEntry, ActivityQuery, DashboardStats};
use crate::services::{activity, stats};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/activity",
    tag = "Dashboard",
    operation_id = "recentActivity",
    summary = "Recent content activity",
    description = "The latest edits across every content type, newest first. `action` is \
        `create` when a row was never modified after insertion, which is a best-effort guess.",
    params(ActivityQuery),
    responses(
        (status = 200, description = "Activity feed", body = Vec<ActivityEntry>),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(limit = query.effective_limit()))]
pub async fn recent_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityEntry>>, AppError> {
    let limit = query.effective_limit();
    let entries = degrade(
        async { activity::recent_activity(state.db()?, limit).await }.await,
        "dashboard.activity",
    )?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    operation_id = "dashboardStats",
    summary = "Content counts",
    description = "`{total, published}` per content type and for the media registry. \
        All zero when the database is unavailable.",
    responses(
        (status = 200, description = "Counts", body = DashboardStats),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = degrade(
        async { stats::dashboard_stats(state.db()?).await }.await,
        "dashboard.stats",
    )?;
    Ok(Json(stats))
}
