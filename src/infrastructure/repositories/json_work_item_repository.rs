use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::repositories::WorkItemRepository;
use crate::domain::work_item::WorkItem;

/// Work items stored as a JSON array in a file
///
/// The file is re-read on every call so edits show up without a restart.
/// Records are matched on their raw `hu_id` before being decoded, so one
/// malformed record does not hide its neighbours.
pub struct JsonFileWorkItemRepository {
    path: PathBuf,
}

impl JsonFileWorkItemRepository {
    /// Creates a new JsonFileWorkItemRepository
    ///
    /// # Arguments
    /// * `path` - Location of the JSON array of work items
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<Vec<Value>, String> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "Work item file not found");
                return Ok(vec![]);
            }
            Err(e) => return Err(format!("Failed to read {}: {}", self.path.display(), e)),
        };

        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", self.path.display(), e))
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("hu_id").and_then(Value::as_str)
}

#[async_trait]
impl WorkItemRepository for JsonFileWorkItemRepository {
    async fn find_by_id(&self, hu_id: &str) -> Result<Option<WorkItem>, String> {
        let Some(record) = self
            .load()
            .await?
            .into_iter()
            .find(|record| record_id(record) == Some(hu_id))
        else {
            return Ok(None);
        };

        serde_json::from_value(record).map(Some).map_err(|e| {
            format!("Work item {} in {} is malformed: {}", hu_id, self.path.display(), e)
        })
    }

    async fn find_all(&self) -> Result<Vec<WorkItem>, String> {
        let items = self
            .load()
            .await?
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let hu_id = record_id(&record).map(str::to_string);
                match serde_json::from_value::<WorkItem>(record) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!(
                            path = %self.path.display(),
                            index,
                            hu_id = ?hu_id,
                            error = %e,
                            "Skipping malformed work item"
                        );
                        None
                    }
                }
            })
            .collect();

        Ok(items)
    }
}
