use serde::{Deserialize, Serialize};

/// A single to-do entry, both in memory and on the wire.
///
/// Serialized field names are camelCase to match the JSON dialect of the
/// remote service and the snapshot file. `sort_order` stays unset until the
/// first reorder assigns one and is omitted from serialized output while
/// unset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Unique within a store, immutable after creation
    pub id: i64,
    pub content: String,
    pub completed: bool,
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

impl TodoItem {
    /// Create a fresh item: not completed, not deleted, no explicit order.
    pub fn new(id: i64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            completed: false,
            deleted: false,
            sort_order: None,
        }
    }
}

/// Arguments for creating a new item.
///
/// This is the POST body sent to the remote service; the id is assigned
/// server-side and comes back on the created item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemArgs {
    pub content: String,
    pub completed: bool,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

/// Arguments for a partial item update.
///
/// Only fields set to `Some` are applied (and serialized into the PATCH
/// body); everything else is left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}
