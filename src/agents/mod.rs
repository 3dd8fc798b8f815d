// Agent registry and capability-based task router
//
// This module discovers remote agents, tracks their capability cards,
// selects a target agent for a work item and dispatches it through the
// JSON-RPC task envelope.

pub mod card;
pub mod dispatcher;
pub mod envelope;
pub mod errors;
pub mod handle;
pub mod orchestrator;
pub mod prompts;
pub mod registry;
pub mod router;
pub mod selector;
pub mod tools;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use card::{Capabilities, CapabilityCard, Skill};
pub use dispatcher::Dispatcher;
pub use errors::{RoutingError, RoutingResult, TransportError};
pub use handle::{AgentSummary, RemoteAgentHandle};
pub use orchestrator::{Orchestrator, RoutingStrategy, TaskOutcome};
pub use registry::{AgentRegistry, RefreshSummary};
pub use router::{KeywordRouter, KeywordRule};
pub use selector::{SkillSelector, ToolSpec};
pub use tools::{SkillTool, ToolTable};
pub use transport::Transport;
