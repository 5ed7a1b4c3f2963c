//! Task creation input and update builder.

use chrono::{DateTime, Utc};
use serde::Serialize;

use plan_core::enums::Priority;

/// Input for `PlanService::create_task`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub list_id: String,
    pub name: String,
    pub description: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub deadline_at: Option<DateTime<Utc>>,
    pub estimate_minutes: Option<i64>,
    pub actual_minutes: Option<i64>,
    pub priority: Priority,
    pub recurring_rule: Option<String>,
}

impl NewTask {
    #[must_use]
    pub fn new(list_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
            name: name.into(),
            description: None,
            scheduled_at: None,
            deadline_at: None,
            estimate_minutes: None,
            actual_minutes: None,
            priority: Priority::None,
            recurring_rule: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    #[must_use]
    pub const fn deadline_at(mut self, at: DateTime<Utc>) -> Self {
        self.deadline_at = Some(at);
        self
    }

    #[must_use]
    pub const fn estimate_minutes(mut self, minutes: i64) -> Self {
        self.estimate_minutes = Some(minutes);
        self
    }

    #[must_use]
    pub const fn actual_minutes(mut self, minutes: i64) -> Self {
        self.actual_minutes = Some(minutes);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn recurring_rule(mut self, rule: impl Into<String>) -> Self {
        self.recurring_rule = Some(rule.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_at: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_minutes: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_minutes: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_rule: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskUpdate {
    /// True when no field is supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Default)]
pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn list_id(mut self, list_id: impl Into<String>) -> Self {
        self.0.list_id = Some(list_id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub const fn scheduled_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.0.scheduled_at = Some(at);
        self
    }

    #[must_use]
    pub const fn deadline_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.0.deadline_at = Some(at);
        self
    }

    #[must_use]
    pub const fn estimate_minutes(mut self, minutes: Option<i64>) -> Self {
        self.0.estimate_minutes = Some(minutes);
        self
    }

    #[must_use]
    pub const fn actual_minutes(mut self, minutes: Option<i64>) -> Self {
        self.0.actual_minutes = Some(minutes);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn recurring_rule(mut self, rule: Option<String>) -> Self {
        self.0.recurring_rule = Some(rule);
        self
    }

    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.0.completed = Some(completed);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}
