use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Attachment, Label, Reminder, Subtask, TaskList};
use crate::enums::Priority;

/// A to-do item owned by a list.
///
/// `completed_at` is set exactly when `completed` is true. A non-null
/// `deleted_at` marks the task soft-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub list_id: String,
    pub name: String,
    pub description: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub deadline_at: Option<DateTime<Utc>>,
    pub estimate_minutes: Option<i64>,
    pub actual_minutes: Option<i64>,
    pub priority: Priority,
    pub recurring_rule: Option<String>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A task assembled with everything that hangs off it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskWithRelations {
    pub task: Task,
    pub list: Option<TaskList>,
    /// Ordered by position.
    pub subtasks: Vec<Subtask>,
    /// Ordered by name.
    pub labels: Vec<Label>,
    /// Ordered by trigger time.
    pub reminders: Vec<Reminder>,
    /// Newest first.
    pub attachments: Vec<Attachment>,
}
