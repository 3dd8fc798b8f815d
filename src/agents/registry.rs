use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tokio::sync::RwLock;

use super::handle::{AgentSummary, RemoteAgentHandle};
use super::transport::Transport;

/// Outcome of one registry (re)initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub loaded: usize,
    pub total: usize,
}

/// Owns one RemoteAgentHandle per configured address
///
/// Iteration order is registration order, which is also the tie-break
/// order when several agents advertise the same skill. The handle list is
/// read-mostly; refreshes swap in new cards under the write lock after all
/// fetches have completed.
pub struct AgentRegistry {
    transport: Arc<dyn Transport>,
    handles: RwLock<Vec<RemoteAgentHandle>>,
    last_refreshed_at: RwLock<Option<DateTime<Utc>>>,
}

impl AgentRegistry {
    /// Creates a registry with one cardless handle per distinct address
    ///
    /// Blank entries are skipped and repeated addresses collapse onto the
    /// first occurrence.
    pub fn new<I, S>(addresses: I, transport: Arc<dyn Transport>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut handles: Vec<RemoteAgentHandle> = Vec::new();
        for address in addresses {
            let handle = RemoteAgentHandle::new(address);
            if handle.address().is_empty()
                || handles.iter().any(|h| h.address() == handle.address())
            {
                continue;
            }
            handles.push(handle);
        }

        Self {
            transport,
            handles: RwLock::new(handles),
            last_refreshed_at: RwLock::new(None),
        }
    }

    /// Fetches the capability card of every configured address
    ///
    /// Fetches run concurrently and are all joined before returning.
    /// Unreachable agents are logged and left cardless; this never fails
    /// as a whole.
    pub async fn initialize(&self) -> RefreshSummary {
        let mut refreshed = self.handles.read().await.clone();
        let transport = self.transport.as_ref();

        let outcomes = join_all(refreshed.iter_mut().map(|handle| handle.refresh(transport))).await;

        let summary = RefreshSummary {
            loaded: outcomes.iter().filter(|loaded| **loaded).count(),
            total: refreshed.len(),
        };

        *self.handles.write().await = refreshed;
        *self.last_refreshed_at.write().await = Some(Utc::now());

        tracing::info!(
            loaded = summary.loaded,
            total = summary.total,
            "Agent registry initialized"
        );
        summary
    }

    /// Returns the first handle, in registration order, whose card
    /// advertises `skill_id`
    pub async fn resolve(&self, skill_id: &str) -> Option<RemoteAgentHandle> {
        self.handles
            .read()
            .await
            .iter()
            .find(|handle| handle.supports(skill_id))
            .cloned()
    }

    /// Summaries of every handle in registration order
    pub async fn describe(&self) -> Vec<AgentSummary> {
        self.handles
            .read()
            .await
            .iter()
            .map(RemoteAgentHandle::summary)
            .collect()
    }

    /// Snapshot of the current handles
    pub async fn handles(&self) -> Vec<RemoteAgentHandle> {
        self.handles.read().await.clone()
    }

    pub async fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        *self.last_refreshed_at.read().await
    }
}
