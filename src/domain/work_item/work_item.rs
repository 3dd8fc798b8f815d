use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A caller-submitted unit of work (a user story, "HU")
///
/// # Invariants
/// - `hu_id` identifies the item and is echoed to the receiving agent
/// - Fields beyond id/title/description are preserved as-is so agents see
///   the full record (preconditions, steps, expected result, ...)
///
/// # Example
/// ```
/// use a2a_orchestrator::domain::work_item::WorkItem;
///
/// let item = WorkItem::new("HU-001", "Login", "El usuario ingresa con su contraseña");
/// assert_eq!(item.routing_text(), "Login El usuario ingresa con su contraseña");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub hu_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkItem {
    pub fn new(
        hu_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            hu_id: hu_id.into(),
            title: title.into(),
            description: description.into(),
            extra: Map::new(),
        }
    }

    /// Text the routers look at: title and description joined by a space
    pub fn routing_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// Payload carried in the task envelope: a JSON array holding this item
    ///
    /// Non-ASCII text is kept verbatim.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&[self])
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
