use thiserror::Error;

use super::envelope::JsonRpcError;

/// Failures raised while talking to a remote agent over HTTP
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} answered with HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("request to {url} failed: {cause}")]
    Network { url: String, cause: String },
}

/// Errors that can occur while routing and dispatching work items
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("Capability card unavailable from {address}: {reason}")]
    FetchFailed { address: String, reason: String },

    #[error("No agent available for work item '{work_item}'{}", skill_suffix(.skill))]
    NoSkillMatch {
        work_item: String,
        skill: Option<String>,
    },

    #[error("Remote agent not initialized: {address}")]
    PreconditionFailed { address: String },

    #[error("Remote agent returned error {0}")]
    RemoteError(JsonRpcError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed remote response: {0}")]
    MalformedResponse(String),

    #[error("Skill selector failed: {0}")]
    SelectorFailed(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn skill_suffix(skill: &Option<String>) -> String {
    match skill {
        Some(skill) => format!(" (skill '{}')", skill),
        None => String::new(),
    }
}

impl RoutingError {
    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            RoutingError::FetchFailed { .. } => "fetch_failed",
            RoutingError::NoSkillMatch { .. } => "no_agent_available",
            RoutingError::PreconditionFailed { .. } => "agent_not_initialized",
            RoutingError::RemoteError(_) => "remote_error",
            RoutingError::Transport(_) => "transport_error",
            RoutingError::MalformedResponse(_) => "malformed_response",
            RoutingError::SelectorFailed(_) => "selector_failed",
            RoutingError::Serialization(_) => "serialization_error",
        }
    }

    /// True when no agent could be selected, as opposed to a selected agent
    /// failing to answer
    pub fn is_not_found(&self) -> bool {
        matches!(self, RoutingError::NoSkillMatch { .. })
    }
}

pub type RoutingResult<T> = Result<T, RoutingError>;
