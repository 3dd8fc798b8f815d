use axum::{extract::State, Json};
use serde::Deserialize;

use crate::agents::TaskOutcome;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::work_item::WorkItem;

/// Request body for routing a stored work item
#[derive(Debug, Deserialize)]
pub struct RouteByIdRequest {
    pub hu_id: String,
}

/// List every stored work item
///
/// GET /work-items
pub async fn list_work_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkItem>>, ApiError> {
    let items = state.work_items.find_all().await.map_err(|e| {
        ApiError::internal_server_error(format!("Failed to load work items: {}", e))
    })?;

    Ok(Json(items))
}

/// Route a stored work item by id
///
/// POST /route-hu
pub async fn route_hu(
    State(state): State<AppState>,
    Json(req): Json<RouteByIdRequest>,
) -> Result<Json<TaskOutcome>, ApiError> {
    let hu_id = req.hu_id.trim();
    if hu_id.is_empty() {
        return Err(ApiError::bad_request("hu_id is required").with_kind("invalid_request"));
    }

    let item = state
        .work_items
        .find_by_id(hu_id)
        .await
        .map_err(|e| {
            ApiError::internal_server_error(format!("Failed to load work items: {}", e))
        })?
        .ok_or_else(|| {
            ApiError::not_found(format!("Work item {} not found", hu_id))
                .with_kind("work_item_not_found")
        })?;

    let outcome = state.orchestrator.handle(&item).await.map_err(|e| {
        tracing::warn!(hu_id = %item.hu_id, kind = e.kind(), "Routing failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(outcome))
}

/// Route a work item supplied inline
///
/// POST /route
pub async fn route(
    State(state): State<AppState>,
    Json(item): Json<WorkItem>,
) -> Result<Json<TaskOutcome>, ApiError> {
    if item.hu_id.trim().is_empty() {
        return Err(ApiError::bad_request("hu_id is required").with_kind("invalid_request"));
    }

    let outcome = state.orchestrator.handle(&item).await.map_err(|e| {
        tracing::warn!(hu_id = %item.hu_id, kind = e.kind(), "Routing failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(outcome))
}
