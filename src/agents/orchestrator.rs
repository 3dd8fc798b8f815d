use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dispatcher::Dispatcher;
use super::errors::{RoutingError, RoutingResult};
use super::handle::{AgentSummary, RemoteAgentHandle};
use super::registry::{AgentRegistry, RefreshSummary};
use super::router::KeywordRouter;
use super::selector::{SkillSelector, ToolSpec};
use super::tools::ToolTable;
use crate::domain::work_item::WorkItem;

/// How a work item is matched to a skill
///
/// The variant is an explicit configuration choice; neither strategy takes
/// precedence over the other.
#[derive(Clone)]
pub enum RoutingStrategy {
    /// Fixed keyword sets scanned in the work item text
    Keyword(KeywordRouter),
    /// External selector choosing one tool from the tool table
    Delegated(Arc<dyn SkillSelector>),
}

impl RoutingStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            RoutingStrategy::Keyword(_) => "keyword",
            RoutingStrategy::Delegated(_) => "delegated",
        }
    }
}

/// Result of a successfully dispatched work item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskOutcome {
    pub hu_id: String,
    pub skill: String,
    pub agent_name: String,
    pub agent_url: String,
    pub correlation_id: String,
    pub result: Value,
}

/// Routes work items to remote agents
///
/// Owns the registry, the routing strategy, the dispatcher and the tool
/// table derived from the registry.
pub struct Orchestrator {
    registry: Arc<AgentRegistry>,
    strategy: RoutingStrategy,
    dispatcher: Dispatcher,
    tools: RwLock<ToolTable>,
    session_id: String,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<AgentRegistry>,
        strategy: RoutingStrategy,
        dispatcher: Dispatcher,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            strategy,
            dispatcher,
            tools: RwLock::new(ToolTable::default()),
            session_id: session_id.into(),
        }
    }

    /// (Re)loads every capability card and rebuilds the tool table
    pub async fn initialize(&self) -> RefreshSummary {
        let summary = self.registry.initialize().await;
        let table = ToolTable::build(&self.registry).await;
        tracing::info!(tools = table.len(), strategy = self.strategy.name(), "Tool table built");
        *self.tools.write().await = table;
        summary
    }

    /// Selects an agent for `item` and dispatches it
    ///
    /// # Returns
    /// * `Ok(TaskOutcome)` - The agent's result
    /// * `Err(RoutingError::NoSkillMatch)` - No agent could be selected
    /// * `Err(_)` - An agent was selected but the call failed
    pub async fn handle(&self, item: &WorkItem) -> RoutingResult<TaskOutcome> {
        let text = item.routing_text();
        tracing::info!(hu_id = %item.hu_id, strategy = self.strategy.name(), "Routing work item");

        match &self.strategy {
            RoutingStrategy::Keyword(router) => {
                let skill = router.select(&text).ok_or_else(|| RoutingError::NoSkillMatch {
                    work_item: item.hu_id.clone(),
                    skill: None,
                })?;

                let handle = self.registry.resolve(skill).await.ok_or_else(|| {
                    RoutingError::NoSkillMatch {
                        work_item: item.hu_id.clone(),
                        skill: Some(skill.to_string()),
                    }
                })?;

                self.dispatch(item, skill, &handle).await
            }
            RoutingStrategy::Delegated(selector) => {
                // offer and lookup share one snapshot of the table
                let table = self.tools.read().await.clone();
                let specs = table.specs();
                if specs.is_empty() {
                    return Err(RoutingError::NoSkillMatch {
                        work_item: item.hu_id.clone(),
                        skill: None,
                    });
                }

                let choice = selector.select(&text, &specs).await?;

                let tool = table.get(&choice).ok_or_else(|| RoutingError::NoSkillMatch {
                    work_item: item.hu_id.clone(),
                    skill: Some(choice.clone()),
                })?;

                let correlation_id = Uuid::new_v4().to_string();
                tracing::info!(
                    hu_id = %item.hu_id,
                    skill = %choice,
                    agent = %tool.agent_name,
                    "Work item routed"
                );
                let result = tool
                    .invoke(&self.dispatcher, &correlation_id, &self.session_id, item)
                    .await?;

                Ok(outcome(item, &choice, &tool.handle, correlation_id, result))
            }
        }
    }

    async fn dispatch(
        &self,
        item: &WorkItem,
        skill: &str,
        handle: &RemoteAgentHandle,
    ) -> RoutingResult<TaskOutcome> {
        let correlation_id = Uuid::new_v4().to_string();
        tracing::info!(
            hu_id = %item.hu_id,
            skill = %skill,
            agent = %handle.address(),
            "Work item routed"
        );

        let result = self
            .dispatcher
            .send(
                handle,
                Some(correlation_id.clone()),
                &self.session_id,
                &item.to_payload()?,
            )
            .await?;

        Ok(outcome(item, skill, handle, correlation_id, result))
    }

    pub async fn describe(&self) -> Vec<AgentSummary> {
        self.registry.describe().await
    }

    pub async fn tool_specs(&self) -> Vec<ToolSpec> {
        self.tools.read().await.specs()
    }

    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    pub fn strategy(&self) -> &RoutingStrategy {
        &self.strategy
    }
}

fn outcome(
    item: &WorkItem,
    skill: &str,
    handle: &RemoteAgentHandle,
    correlation_id: String,
    result: Value,
) -> TaskOutcome {
    let (agent_name, agent_url) = match handle.card() {
        Some(card) => (card.name.clone(), card.url.clone()),
        None => ("Unknown".to_string(), handle.address().to_string()),
    };

    TaskOutcome {
        hu_id: item.hu_id.clone(),
        skill: skill.to_string(),
        agent_name,
        agent_url,
        correlation_id,
        result,
    }
}
