use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A checklist item inside a task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Subtask {
    pub id: String,
    pub task_id: String,
    pub name: String,
    pub completed: bool,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}
