use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Reminder {
    pub id: String,
    pub task_id: String,
    pub remind_at: DateTime<Utc>,
    pub sent: bool,
    pub created_at: DateTime<Utc>,
}
