use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::RoutingResult;

/// One callable skill offered to a delegated selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
}

/// Non-deterministic selection strategy (typically LLM-backed)
///
/// Given the work item text and the callable skills, an implementation must
/// choose exactly one tool and return its name. The orchestrator does not
/// second-guess the choice beyond looking the name up in its tool table.
#[async_trait]
pub trait SkillSelector: Send + Sync {
    async fn select(&self, text: &str, tools: &[ToolSpec]) -> RoutingResult<String>;
}
