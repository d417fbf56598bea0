use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of a bulk progress delete: `{ "success": true, "deletedIds": [...] }`.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedProgress {
    pub success: bool,
    /// Ids that existed and were removed.
    pub deleted_ids: Vec<i64>,
}

impl DeletedProgress {
    pub fn new(deleted_ids: Vec<i64>) -> Self {
        Self {
            success: true,
            deleted_ids,
        }
    }
}
