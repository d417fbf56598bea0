use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::RecordId;

/// Progress entries to delete.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(default)]
pub struct DeleteProgress {
    #[validate(length(min = 1))]
    pub ids: Vec<RecordId>,
}

impl DeleteProgress {
    pub fn progress_ids(&self) -> Vec<i64> {
        RecordId::collect(&self.ids)
    }
}
