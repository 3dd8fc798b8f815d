use std::sync::Arc;

use crate::agents::Orchestrator;
use crate::domain::repositories::WorkItemRepository;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub work_items: Arc<dyn WorkItemRepository>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>, work_items: Arc<dyn WorkItemRepository>) -> Self {
        Self {
            orchestrator,
            work_items,
        }
    }
}
