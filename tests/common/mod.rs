//! Shared helpers for integration tests
//!
//! Spawns in-process A2A agents on ephemeral ports so the orchestrator is
//! exercised over real HTTP.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use a2a_orchestrator::agents::envelope::{parse_work_item_payload, TaskRequest};
use a2a_orchestrator::agents::{
    AgentRegistry, Dispatcher, KeywordRouter, Orchestrator, RoutingStrategy, Transport,
};
use a2a_orchestrator::api::{build_router, AppState};
use a2a_orchestrator::domain::repositories::WorkItemRepository;
use a2a_orchestrator::domain::work_item::WorkItem;
use a2a_orchestrator::infrastructure::repositories::InMemoryWorkItemRepository;
use a2a_orchestrator::infrastructure::transport::HttpTransport;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// How a stub agent answers
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Replies with a result echoing the hu_ids it received
    Echo,
    /// Replies with a JSON-RPC error
    Fail { code: i64, message: String },
    /// Delays its capability card by the given duration
    SlowCard(Duration),
    /// Serves its card at once but delays every task reply
    SlowTask(Duration),
}

struct StubAgent {
    name: String,
    card: Value,
    behavior: Behavior,
    received: Mutex<Vec<Value>>,
}

/// A running stub agent
pub struct AgentServer {
    pub address: String,
    agent: Arc<StubAgent>,
}

impl AgentServer {
    /// Raw JSON-RPC requests received so far
    pub fn received(&self) -> Vec<Value> {
        self.agent.received.lock().unwrap().clone()
    }
}

/// Starts an agent advertising `skills` on 127.0.0.1
pub async fn spawn_agent(name: &str, skills: &[&str], behavior: Behavior) -> AgentServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub agent");
    let address = format!("http://{}", listener.local_addr().unwrap());

    let card = json!({
        "name": name,
        "description": format!("{} test agent", name),
        "url": address,
        "skills": skills
            .iter()
            .map(|id| json!({"id": id, "name": id}))
            .collect::<Vec<_>>(),
        "capabilities": {"streaming": false}
    });

    let agent = Arc::new(StubAgent {
        name: name.to_string(),
        card,
        behavior,
        received: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/.well-known/agent.json", get(serve_card))
        .route("/jsonrpc", post(serve_task))
        .with_state(agent.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub agent failed");
    });

    AgentServer { address, agent }
}

async fn serve_card(State(agent): State<Arc<StubAgent>>) -> Json<Value> {
    if let Behavior::SlowCard(delay) = agent.behavior {
        tokio::time::sleep(delay).await;
    }
    Json(agent.card.clone())
}

async fn serve_task(State(agent): State<Arc<StubAgent>>, body: String) -> Json<Value> {
    let raw: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    agent.received.lock().unwrap().push(raw.clone());

    if let Behavior::SlowTask(delay) = agent.behavior {
        tokio::time::sleep(delay).await;
    }

    let request = match TaskRequest::decode(&body) {
        Ok(request) => request,
        Err(error) => return Json(json!({"jsonrpc": "2.0", "id": raw["id"], "error": error})),
    };

    if let Behavior::Fail { code, message } = &agent.behavior {
        return Json(json!({
            "jsonrpc": "2.0",
            "id": request.id,
            "error": {"code": code, "message": message}
        }));
    }

    match parse_work_item_payload(request.text().unwrap_or_default()) {
        Ok(items) => {
            let ids: Vec<Value> = items.iter().map(|item| item["hu_id"].clone()).collect();
            Json(json!({
                "jsonrpc": "2.0",
                "id": request.id,
                "result": {"status": "completed", "agent": agent.name, "hu_ids": ids}
            }))
        }
        Err(error) => Json(json!({"jsonrpc": "2.0", "id": request.id, "error": error})),
    }
}

/// Transport with short timeouts for tests
pub fn transport(fetch_timeout: Duration) -> Arc<dyn Transport> {
    transport_with(fetch_timeout, Duration::from_secs(5))
}

pub fn transport_with(fetch_timeout: Duration, dispatch_timeout: Duration) -> Arc<dyn Transport> {
    Arc::new(HttpTransport::new(fetch_timeout, dispatch_timeout))
}

/// Builds and initializes a keyword-routing orchestrator
pub async fn keyword_orchestrator(addresses: Vec<String>) -> Arc<Orchestrator> {
    keyword_orchestrator_with(addresses, Duration::from_secs(5)).await
}

/// Same as `keyword_orchestrator` with a custom dispatch timeout
pub async fn keyword_orchestrator_with(
    addresses: Vec<String>,
    dispatch_timeout: Duration,
) -> Arc<Orchestrator> {
    let transport = transport_with(Duration::from_secs(2), dispatch_timeout);
    let registry = Arc::new(AgentRegistry::new(addresses, transport.clone()));
    let orchestrator = Arc::new(Orchestrator::new(
        registry,
        RoutingStrategy::Keyword(KeywordRouter::default()),
        Dispatcher::new(transport),
        "session-test",
    ));
    orchestrator.initialize().await;
    orchestrator
}

/// Builds the API router over `orchestrator` and an in-memory work item store
pub fn app(orchestrator: Arc<Orchestrator>, items: Vec<WorkItem>) -> Router {
    app_with(orchestrator, Arc::new(InMemoryWorkItemRepository::new(items)))
}

pub fn app_with(
    orchestrator: Arc<Orchestrator>,
    work_items: Arc<dyn WorkItemRepository>,
) -> Router {
    build_router(AppState::new(orchestrator, work_items))
}

/// Address nothing listens on
pub async fn dead_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    address
}
