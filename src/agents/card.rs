use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// A unit of work an agent claims it can perform
///
/// `id` is the routing key. It is unique within one card but two agents may
/// advertise the same id, in which case the first registered agent wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Optional protocol features advertised by an agent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub streaming: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<BTreeSet<String>>,
}

/// Self-description published by a remote agent at `/.well-known/agent.json`
///
/// # Invariants
/// - `url` is the authoritative dispatch address for the agent, overriding
///   whatever address was used to fetch the card
/// - Skill ids are non-empty and unique within the card
/// - Immutable once received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub capabilities: Capabilities,
}

impl CapabilityCard {
    /// Decodes and validates a card received from the network
    ///
    /// # Returns
    /// * `Ok(CapabilityCard)` - If the body is a well-formed card
    /// * `Err(String)` - Reason the card was rejected
    pub fn from_json(body: &str) -> Result<Self, String> {
        let card: CapabilityCard =
            serde_json::from_str(body).map_err(|e| format!("invalid card JSON: {}", e))?;
        card.validate()?;
        Ok(card)
    }

    fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("card has no url".to_string());
        }

        let mut seen = HashSet::new();
        for skill in &self.skills {
            if skill.id.is_empty() {
                return Err("card has a skill with an empty id".to_string());
            }
            if !seen.insert(skill.id.as_str()) {
                return Err(format!("card repeats skill id '{}'", skill.id));
            }
        }

        Ok(())
    }

    /// Returns true if the card advertises a skill with this id
    pub fn supports(&self, skill_id: &str) -> bool {
        self.skills.iter().any(|skill| skill.id == skill_id)
    }

    /// Skill ids in advertised order
    pub fn skill_ids(&self) -> Vec<String> {
        self.skills.iter().map(|skill| skill.id.clone()).collect()
    }

    /// Dispatch endpoint derived from the card's own url
    pub fn jsonrpc_endpoint(&self) -> String {
        format!("{}/jsonrpc", self.url.trim_end_matches('/'))
    }
}
