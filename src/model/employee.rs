use serde::{Deserialize, Serialize};

/// Employee directory entry, stored in the `users` collection keyed by
/// employee id.
///
/// The manager link is a weak reference: it is looked up per write and
/// never owns the manager document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub name: String,

    #[serde(default)]
    pub assigned_manager_id: Option<String>,
}
