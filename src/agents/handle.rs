use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::card::CapabilityCard;
use super::errors::{RoutingError, RoutingResult};
use super::transport::Transport;

pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

/// The registry's live record of one configured remote agent
///
/// `card` is `None` until a fetch succeeds, and goes back to `None` when a
/// later fetch fails. A stale card is never kept.
#[derive(Debug, Clone)]
pub struct RemoteAgentHandle {
    address: String,
    card: Option<Arc<CapabilityCard>>,
}

/// Introspection view of a handle, as returned by `GET /agents`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub name: String,
    pub description: String,
    pub url: String,
    pub streaming: bool,
    pub skills: Vec<String>,
}

impl RemoteAgentHandle {
    /// Creates a cardless handle for `address`
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        Self {
            address: address.trim().trim_end_matches('/').to_string(),
            card: None,
        }
    }

    /// Creates a handle that already holds a card
    pub fn with_card(address: impl Into<String>, card: CapabilityCard) -> Self {
        let mut handle = Self::new(address);
        handle.card = Some(Arc::new(card));
        handle
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn card(&self) -> Option<&CapabilityCard> {
        self.card.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.card.is_some()
    }

    /// Returns true if the loaded card advertises `skill_id`
    pub fn supports(&self, skill_id: &str) -> bool {
        self.card().is_some_and(|card| card.supports(skill_id))
    }

    pub fn card_url(&self) -> String {
        format!("{}{}", self.address, AGENT_CARD_PATH)
    }

    /// Fetches and validates this agent's capability card
    pub async fn fetch_card(&self, transport: &dyn Transport) -> RoutingResult<CapabilityCard> {
        let body = transport
            .get(&self.card_url())
            .await
            .map_err(|e| RoutingError::FetchFailed {
                address: self.address.clone(),
                reason: e.to_string(),
            })?;

        CapabilityCard::from_json(&body).map_err(|reason| RoutingError::FetchFailed {
            address: self.address.clone(),
            reason,
        })
    }

    /// Re-fetches the card, replacing it wholesale
    ///
    /// Failures are logged and leave the handle cardless; they never
    /// propagate.
    pub async fn refresh(&mut self, transport: &dyn Transport) -> bool {
        match self.fetch_card(transport).await {
            Ok(card) => {
                tracing::info!(
                    address = %self.address,
                    agent = %card.name,
                    skills = ?card.skill_ids(),
                    "Capability card loaded"
                );
                self.card = Some(Arc::new(card));
                true
            }
            Err(e) => {
                tracing::warn!(address = %self.address, error = %e, "Capability card fetch failed");
                self.card = None;
                false
            }
        }
    }

    /// Summary of the handle, with a placeholder when no card is loaded
    pub fn summary(&self) -> AgentSummary {
        match self.card() {
            Some(card) => AgentSummary {
                name: card.name.clone(),
                description: card.description.clone(),
                url: card.url.clone(),
                streaming: card.capabilities.streaming,
                skills: card.skill_ids(),
            },
            None => AgentSummary {
                name: "Unknown".to_string(),
                description: "Not loaded".to_string(),
                url: self.address.clone(),
                streaming: false,
                skills: vec![],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::card::{Capabilities, Skill};
    use crate::agents::test_support::StubTransport;

    fn card(url: &str, skill: &str) -> CapabilityCard {
        CapabilityCard {
            name: format!("Agent {}", skill),
            description: "test agent".to_string(),
            url: url.to_string(),
            skills: vec![Skill {
                id: skill.to_string(),
                name: skill.to_uppercase(),
                description: None,
            }],
            capabilities: Capabilities::default(),
        }
    }

    #[test]
    fn new_handle_trims_trailing_slash() {
        let handle = RemoteAgentHandle::new("http://pgp:5002/");

        assert_eq!(handle.address(), "http://pgp:5002");
        assert_eq!(handle.card_url(), "http://pgp:5002/.well-known/agent.json");
        assert!(!handle.is_loaded());
    }

    #[test]
    fn summary_placeholder_when_not_loaded() {
        let summary = RemoteAgentHandle::new("http://down:1").summary();

        assert_eq!(
            summary,
            AgentSummary {
                name: "Unknown".to_string(),
                description: "Not loaded".to_string(),
                url: "http://down:1".to_string(),
                streaming: false,
                skills: vec![],
            }
        );
    }

    #[test]
    fn summary_uses_card_url_over_address() {
        let handle =
            RemoteAgentHandle::with_card("http://localhost:8001", card("http://pgp:5002", "pgp"));
        let summary = handle.summary();

        assert_eq!(summary.url, "http://pgp:5002");
        assert_eq!(summary.skills, vec!["pgp".to_string()]);
    }

    #[tokio::test]
    async fn refresh_loads_card() {
        let transport = StubTransport::new().with_card("http://a", &card("http://a", "clima"));
        let mut handle = RemoteAgentHandle::new("http://a");

        assert!(handle.refresh(&transport).await);
        assert!(handle.supports("clima"));
        assert_eq!(transport.calls(), vec!["GET http://a/.well-known/agent.json".to_string()]);
    }

    #[tokio::test]
    async fn failed_refresh_drops_previous_card() {
        let transport = StubTransport::new();
        let mut handle = RemoteAgentHandle::with_card("http://a", card("http://a", "clima"));

        assert!(!handle.refresh(&transport).await);
        assert!(!handle.is_loaded());
    }

    #[tokio::test]
    async fn invalid_card_is_fetch_failure() {
        let transport = StubTransport::new()
            .with_get("http://a/.well-known/agent.json", Ok("{\"name\":1}".to_string()));
        let handle = RemoteAgentHandle::new("http://a");

        let err = handle.fetch_card(&transport).await.unwrap_err();
        assert_eq!(err.kind(), "fetch_failed");
    }
}
