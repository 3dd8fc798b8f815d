use async_trait::async_trait;

use super::errors::TransportError;

/// Outbound HTTP port used by the registry and the dispatcher
///
/// Implementations must enforce a bounded timeout per call and report
/// non-2xx statuses as errors. No retries are performed.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the response body
    async fn get(&self, url: &str) -> Result<String, TransportError>;

    /// POST a JSON `body` to `url` and return the response body
    async fn post_json(&self, url: &str, body: &str) -> Result<String, TransportError>;
}
