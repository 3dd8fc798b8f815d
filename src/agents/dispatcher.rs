use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use super::envelope::{decode_response, TaskRequest, TaskResponse};
use super::errors::{RoutingError, RoutingResult};
use super::handle::RemoteAgentHandle;
use super::transport::Transport;

/// Sends `tasks/send` envelopes to remote agents and interprets replies
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sends `payload` to the agent behind `handle`
    ///
    /// # Arguments
    /// * `handle` - Target agent; must have a loaded card
    /// * `correlation_id` - Envelope id, a fresh UUID when `None`
    /// * `session_id` - Session the task belongs to
    /// * `payload` - Text carried in the single message part
    ///
    /// # Returns
    /// * `Ok(Value)` - The remote `result` object
    /// * `Err(RoutingError::PreconditionFailed)` - Handle has no card; no
    ///   network call is made
    /// * `Err(RoutingError::RemoteError)` - Remote JSON-RPC error, unchanged
    /// * `Err(RoutingError::Transport)` - Non-2xx status, network failure or
    ///   timeout
    /// * `Err(RoutingError::MalformedResponse)` - Reply is not an envelope
    pub async fn send(
        &self,
        handle: &RemoteAgentHandle,
        correlation_id: Option<String>,
        session_id: &str,
        payload: &str,
    ) -> RoutingResult<Value> {
        let card = handle.card().ok_or_else(|| RoutingError::PreconditionFailed {
            address: handle.address().to_string(),
        })?;

        let id = correlation_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let request = TaskRequest::send_task(id.as_str(), session_id, payload);
        let endpoint = card.jsonrpc_endpoint();

        tracing::info!(
            agent = %card.name,
            endpoint = %endpoint,
            correlation_id = %id,
            "Dispatching task"
        );

        let body = self
            .transport
            .post_json(&endpoint, &request.encode()?)
            .await
            .map_err(|e| {
                tracing::error!(agent = %card.name, error = %e, "Task dispatch failed");
                RoutingError::from(e)
            })?;

        match decode_response(&body)? {
            TaskResponse::Result(result) => {
                tracing::debug!(agent = %card.name, correlation_id = %id, "Task completed");
                Ok(result)
            }
            TaskResponse::Error(error) => {
                tracing::warn!(
                    agent = %card.name,
                    code = error.code,
                    message = %error.message,
                    "Remote agent returned an error"
                );
                Err(RoutingError::RemoteError(error))
            }
        }
    }
}
