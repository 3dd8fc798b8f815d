use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};

use crate::agents::errors::TransportError;
use crate::agents::transport::Transport;

/// reqwest implementation of the Transport port
///
/// Capability fetches and task dispatches get separate timeouts since
/// dispatches wait on the remote agent's work.
pub struct HttpTransport {
    client: Client,
    fetch_timeout: Duration,
    dispatch_timeout: Duration,
}

impl HttpTransport {
    /// Creates a new HttpTransport
    ///
    /// # Arguments
    /// * `fetch_timeout` - Timeout applied to every GET
    /// * `dispatch_timeout` - Timeout applied to every POST
    pub fn new(fetch_timeout: Duration, dispatch_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            fetch_timeout,
            dispatch_timeout,
        }
    }

    async fn execute(&self, url: &str, request: RequestBuilder) -> Result<String, TransportError> {
        let response = request.send().await.map_err(|e| classify(url, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| classify(url, e))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

fn classify(url: &str, error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Network {
            url: url.to_string(),
            cause: error.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let request = self.client.get(url).timeout(self.fetch_timeout);
        self.execute(url, request).await
    }

    async fn post_json(&self, url: &str, body: &str) -> Result<String, TransportError> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .timeout(self.dispatch_timeout);
        self.execute(url, request).await
    }
}
