use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// One recorded transition of a single task field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChangeRecord {
    pub id: String,
    pub task_id: String,
    pub field_name: String,
    pub old_value: FieldValue,
    pub new_value: FieldValue,
    pub changed_at: DateTime<Utc>,
}

/// Number of recorded changes for one field of a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldChangeCount {
    pub field_name: String,
    pub count: u64,
}
