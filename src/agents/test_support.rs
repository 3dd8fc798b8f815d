// In-process Transport double for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::card::{Capabilities, CapabilityCard, Skill};
use super::errors::TransportError;
use super::transport::Transport;

/// Transport that answers from canned responses and records every call
///
/// Unknown URLs fail with a network error, like an unreachable host.
#[derive(Default)]
pub struct StubTransport {
    gets: HashMap<String, Result<String, TransportError>>,
    posts: HashMap<String, Result<String, TransportError>>,
    calls: Mutex<Vec<String>>,
    bodies: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_get(mut self, url: &str, response: Result<String, TransportError>) -> Self {
        self.gets.insert(url.to_string(), response);
        self
    }

    pub fn with_post(mut self, url: &str, response: Result<String, TransportError>) -> Self {
        self.posts.insert(url.to_string(), response);
        self
    }

    /// Serves `card` from `address`'s well-known path
    pub fn with_card(self, address: &str, card: &CapabilityCard) -> Self {
        let url = format!("{}/.well-known/agent.json", address);
        let body = serde_json::to_string(card).unwrap();
        self.with_get(&url, Ok(body))
    }

    /// Calls made so far, as `"GET url"` / `"POST url"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn posted_bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }

    fn answer(
        &self,
        table: &HashMap<String, Result<String, TransportError>>,
        url: &str,
    ) -> Result<String, TransportError> {
        table.get(url).cloned().unwrap_or_else(|| {
            Err(TransportError::Network {
                url: url.to_string(),
                cause: "connection refused".to_string(),
            })
        })
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(format!("GET {}", url));
        self.answer(&self.gets, url)
    }

    async fn post_json(&self, url: &str, body: &str) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(format!("POST {}", url));
        self.bodies.lock().unwrap().push(body.to_string());
        self.answer(&self.posts, url)
    }
}

/// Card for `url` advertising the given skill ids
pub fn card(name: &str, url: &str, skills: &[&str]) -> CapabilityCard {
    CapabilityCard {
        name: name.to_string(),
        description: format!("{} test agent", name),
        url: url.to_string(),
        skills: skills
            .iter()
            .map(|id| Skill {
                id: id.to_string(),
                name: id.to_uppercase(),
                description: Some(format!("Handles {}", id)),
            })
            .collect(),
        capabilities: Capabilities::default(),
    }
}
