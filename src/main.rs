use std::sync::Arc;

use a2a_orchestrator::agents::{
    AgentRegistry, Dispatcher, KeywordRouter, Orchestrator, RoutingStrategy, Transport,
};
use a2a_orchestrator::api::{build_router, AppState};
use a2a_orchestrator::config::{Config, StrategyKind};
use a2a_orchestrator::infrastructure::repositories::JsonFileWorkItemRepository;
use a2a_orchestrator::infrastructure::selectors::{ChatCompletionConfig, ChatCompletionSelector};
use a2a_orchestrator::infrastructure::transport::HttpTransport;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env().expect("Invalid configuration");

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(
        config.fetch_timeout,
        config.dispatch_timeout,
    ));
    let registry = Arc::new(AgentRegistry::new(
        config.agent_urls.clone(),
        transport.clone(),
    ));

    let strategy = match config.strategy {
        StrategyKind::Keyword => RoutingStrategy::Keyword(KeywordRouter::default()),
        StrategyKind::Delegated => {
            let selector = ChatCompletionSelector::new(ChatCompletionConfig {
                base_url: config.selector.base_url.clone(),
                model: config.selector.model.clone(),
                // from_env rejects a delegated config without a key
                api_key: config.selector.api_key.clone().unwrap_or_default(),
                timeout: config.selector.timeout,
            });
            RoutingStrategy::Delegated(Arc::new(selector))
        }
    };

    let orchestrator = Arc::new(Orchestrator::new(
        registry,
        strategy,
        Dispatcher::new(transport),
        config.session_id.clone(),
    ));

    // Load capability cards
    tracing::info!(agents = config.agent_urls.len(), "Loading agent cards...");
    let summary = orchestrator.initialize().await;
    if summary.loaded == 0 {
        tracing::warn!("No agent card could be loaded; routing will fail until a refresh succeeds");
    } else {
        tracing::info!(loaded = summary.loaded, total = summary.total, "Agent cards loaded");
    }

    let work_items = Arc::new(JsonFileWorkItemRepository::new(&config.work_items_path));
    let app = build_router(AppState::new(orchestrator, work_items));

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
