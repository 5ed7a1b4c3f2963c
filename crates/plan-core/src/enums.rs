//! Priority levels and tracked task fields.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! and `as_str()` returns the exact text stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Task priority. Never null: tasks without an explicit priority are `None`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::High, Self::Medium, Self::Low, Self::None];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskField
// ---------------------------------------------------------------------------

/// A task attribute whose transitions are recorded in the change history.
///
/// The string form doubles as the column name in `tasks` and as the
/// `field_name` stored on each `ChangeRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    ListId,
    Name,
    Description,
    ScheduledAt,
    DeadlineAt,
    EstimateMinutes,
    ActualMinutes,
    Priority,
    RecurringRule,
    Completed,
    CompletedAt,
    DeletedAt,
}

impl TaskField {
    pub const ALL: [Self; 12] = [
        Self::ListId,
        Self::Name,
        Self::Description,
        Self::ScheduledAt,
        Self::DeadlineAt,
        Self::EstimateMinutes,
        Self::ActualMinutes,
        Self::Priority,
        Self::RecurringRule,
        Self::Completed,
        Self::CompletedAt,
        Self::DeletedAt,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListId => "list_id",
            Self::Name => "name",
            Self::Description => "description",
            Self::ScheduledAt => "scheduled_at",
            Self::DeadlineAt => "deadline_at",
            Self::EstimateMinutes => "estimate_minutes",
            Self::ActualMinutes => "actual_minutes",
            Self::Priority => "priority",
            Self::RecurringRule => "recurring_rule",
            Self::Completed => "completed",
            Self::CompletedAt => "completed_at",
            Self::DeletedAt => "deleted_at",
        }
    }

    /// Look up a field by its stored name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
