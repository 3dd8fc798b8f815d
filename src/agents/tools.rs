use serde_json::Value;

use super::card::Skill;
use super::dispatcher::Dispatcher;
use super::errors::RoutingResult;
use super::handle::RemoteAgentHandle;
use super::registry::AgentRegistry;
use super::selector::ToolSpec;
use crate::domain::work_item::WorkItem;

/// A callable skill bound to the agent that advertises it
#[derive(Debug, Clone)]
pub struct SkillTool {
    pub skill: Skill,
    pub agent_name: String,
    pub handle: RemoteAgentHandle,
}

impl SkillTool {
    pub fn spec(&self) -> ToolSpec {
        let description = match &self.skill.description {
            Some(description) => format!("{} ({})", description, self.agent_name),
            None => format!("Handles tasks related to '{}' ({})", self.skill.id, self.agent_name),
        };

        ToolSpec {
            name: self.skill.id.clone(),
            description,
        }
    }

    /// Dispatches `item` to the bound agent
    pub async fn invoke(
        &self,
        dispatcher: &Dispatcher,
        correlation_id: &str,
        session_id: &str,
        item: &WorkItem,
    ) -> RoutingResult<Value> {
        tracing::info!(skill = %self.skill.id, hu_id = %item.hu_id, "Invoking skill tool");
        dispatcher
            .send(
                &self.handle,
                Some(correlation_id.to_string()),
                session_id,
                &item.to_payload()?,
            )
            .await
    }
}

/// Skill id -> tool mapping, built once per registry refresh
///
/// Only agents with a loaded card contribute. When several agents advertise
/// the same skill the first registered one keeps it.
#[derive(Debug, Clone, Default)]
pub struct ToolTable {
    tools: Vec<SkillTool>,
}

impl ToolTable {
    pub async fn build(registry: &AgentRegistry) -> Self {
        let mut tools: Vec<SkillTool> = Vec::new();

        for handle in registry.handles().await {
            let Some(card) = handle.card() else {
                continue;
            };
            for skill in &card.skills {
                if tools.iter().any(|tool| tool.skill.id == skill.id) {
                    tracing::debug!(
                        skill = %skill.id,
                        agent = %card.name,
                        "Skill already provided by an earlier agent"
                    );
                    continue;
                }
                tools.push(SkillTool {
                    skill: skill.clone(),
                    agent_name: card.name.clone(),
                    handle: handle.clone(),
                });
            }
        }

        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&SkillTool> {
        self.tools.iter().find(|tool| tool.skill.id == name)
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(SkillTool::spec).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
