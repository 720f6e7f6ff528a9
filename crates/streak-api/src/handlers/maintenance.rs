//! Forced refresh, background task, and migration handlers

use axum::{extract::State, Json};
use streak_service::{MaintenanceService, RequalifyResponse, TaskAcceptedResponse, TaskResponse};

use crate::extractors::TaskIdPath;
use crate::response::{Accepted, ApiResult};
use crate::state::AppState;

/// Start a fleet-wide sync and profile refresh
///
/// POST /refresh
pub async fn force_refresh(
    State(state): State<AppState>,
) -> ApiResult<Accepted<Json<TaskAcceptedResponse>>> {
    let service = MaintenanceService::new(state.service_context());
    let response = service.force_refresh()?;
    Ok(Accepted(Json(response)))
}

/// Background task status
///
/// GET /tasks/{task_id}
pub async fn get_task(
    State(state): State<AppState>,
    TaskIdPath(task_id): TaskIdPath,
) -> ApiResult<Json<TaskResponse>> {
    let service = MaintenanceService::new(state.service_context());
    let response = service.task(task_id)?;
    Ok(Json(response))
}

/// Upgrade stored records that now qualify under current tiers
///
/// POST /maintenance/requalify
pub async fn requalify(State(state): State<AppState>) -> ApiResult<Json<RequalifyResponse>> {
    let service = MaintenanceService::new(state.service_context());
    let response = service.requalify_all().await?;
    Ok(Json(response))
}
