use async_trait::async_trait;

use crate::domain::work_item::WorkItem;

/// Repository trait for work items
///
/// Implementations decide where items live (a JSON file, memory, ...).
#[async_trait]
pub trait WorkItemRepository: Send + Sync {
    /// Find a work item by its `hu_id`
    async fn find_by_id(&self, hu_id: &str) -> Result<Option<WorkItem>, String>;

    /// Find all stored work items
    async fn find_all(&self) -> Result<Vec<WorkItem>, String>;
}
