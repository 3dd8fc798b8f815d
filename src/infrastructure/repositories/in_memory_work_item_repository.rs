use async_trait::async_trait;

use crate::domain::repositories::WorkItemRepository;
use crate::domain::work_item::WorkItem;

/// In-memory implementation of WorkItemRepository
#[derive(Default)]
pub struct InMemoryWorkItemRepository {
    items: Vec<WorkItem>,
}

impl InMemoryWorkItemRepository {
    pub fn new(items: Vec<WorkItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl WorkItemRepository for InMemoryWorkItemRepository {
    async fn find_by_id(&self, hu_id: &str) -> Result<Option<WorkItem>, String> {
        Ok(self.items.iter().find(|item| item.hu_id == hu_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<WorkItem>, String> {
        Ok(self.items.clone())
    }
}
