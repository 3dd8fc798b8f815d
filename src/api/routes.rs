use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{agents, routing};
use crate::api::state::AppState;

/// Builds the HTTP router with tracing and permissive CORS
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(agents::health_check))
        .route("/agents", get(agents::list_agents))
        .route("/agents/refresh", post(agents::refresh_agents))
        .route("/tools", get(agents::list_tools))
        .route("/work-items", get(routing::list_work_items))
        .route("/route-hu", post(routing::route_hu))
        .route("/route", post(routing::route))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
