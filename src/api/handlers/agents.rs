use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::agents::{AgentSummary, ToolSpec};
use crate::api::state::AppState;

/// Response from a registry refresh
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub loaded: usize,
    pub total: usize,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub agents: Vec<AgentSummary>,
}

/// Response describing the active routing strategy
#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub strategy: &'static str,
    pub tools: Vec<ToolSpec>,
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "a2a-orchestrator"
    }))
}

/// List every registered agent, loaded or not
///
/// GET /agents
pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<AgentSummary>> {
    Json(state.orchestrator.describe().await)
}

/// Re-fetch every capability card
///
/// POST /agents/refresh
pub async fn refresh_agents(State(state): State<AppState>) -> Json<RefreshResponse> {
    let summary = state.orchestrator.initialize().await;

    Json(RefreshResponse {
        loaded: summary.loaded,
        total: summary.total,
        refreshed_at: state.orchestrator.registry().last_refreshed_at().await,
        agents: state.orchestrator.describe().await,
    })
}

/// Tools currently offered to the delegated selector
///
/// GET /tools
pub async fn list_tools(State(state): State<AppState>) -> Json<ToolsResponse> {
    Json(ToolsResponse {
        strategy: state.orchestrator.strategy().name(),
        tools: state.orchestrator.tool_specs().await,
    })
}
