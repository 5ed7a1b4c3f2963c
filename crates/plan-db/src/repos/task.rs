//! Task repository: create, diff-aware update, and the convenience wrappers
//! built on it.
//!
//! `update_task` compares each supplied field with the stored value and only
//! writes (and records) the ones that differ. Toggling `completed` also stages
//! `completed_at`, so the pair never disagrees.

use chrono::{DateTime, Utc};

use plan_core::entities::Task;
use plan_core::enums::{Priority, TaskField};
use plan_core::ids::PREFIX_TASK;
use plan_core::value::FieldValue;

use crate::entity::Entity;
use crate::error::DatabaseError;
use crate::helpers::{
    empty_to_none, field_value_to_sql, format_datetime, get_bool, get_datetime,
    get_opt_datetime, get_opt_string, opt_datetime_to_sql, parse_enum, truncate_millis,
};
use crate::service::PlanService;
use crate::updates::task::{NewTask, TaskUpdate, TaskUpdateBuilder};

impl Entity for Task {
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "list_id",
        "name",
        "description",
        "scheduled_at",
        "deadline_at",
        "estimate_minutes",
        "actual_minutes",
        "priority",
        "recurring_rule",
        "completed",
        "completed_at",
        "created_at",
        "updated_at",
        "deleted_at",
    ];

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            list_id: row.get(1)?,
            name: row.get(2)?,
            description: get_opt_string(row, 3)?,
            scheduled_at: get_opt_datetime(row, 4)?,
            deadline_at: get_opt_datetime(row, 5)?,
            estimate_minutes: row.get::<Option<i64>>(6)?,
            actual_minutes: row.get::<Option<i64>>(7)?,
            priority: parse_enum(&row.get::<String>(8)?)?,
            recurring_rule: get_opt_string(row, 9)?,
            completed: get_bool(row, 10)?,
            completed_at: get_opt_datetime(row, 11)?,
            created_at: get_datetime(row, 12)?,
            updated_at: get_datetime(row, 13)?,
            deleted_at: get_opt_datetime(row, 14)?,
        })
    }
}

/// One field transition waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StagedChange {
    pub field: TaskField,
    pub old: FieldValue,
    pub new: FieldValue,
}

fn stage<T>(changes: &mut Vec<StagedChange>, field: TaskField, current: &T, requested: Option<&T>)
where
    T: PartialEq + Clone + Into<FieldValue>,
{
    if let Some(requested) = requested {
        if requested != current {
            changes.push(StagedChange {
                field,
                old: current.clone().into(),
                new: requested.clone().into(),
            });
        }
    }
}

fn truncate_opt(value: Option<Option<DateTime<Utc>>>) -> Option<Option<DateTime<Utc>>> {
    value.map(|inner| inner.map(truncate_millis))
}

/// Compare `update` against `current` and stage one change per differing
/// field, in column order. Turning `completed` on stages `completed_at = now`;
/// turning it off stages `completed_at = NULL`.
pub(crate) fn stage_changes(
    current: &Task,
    update: &TaskUpdate,
    now: DateTime<Utc>,
) -> Vec<StagedChange> {
    let mut changes = Vec::new();
    let scheduled_at = truncate_opt(update.scheduled_at);
    let deadline_at = truncate_opt(update.deadline_at);

    stage(&mut changes, TaskField::ListId, &current.list_id, update.list_id.as_ref());
    stage(&mut changes, TaskField::Name, &current.name, update.name.as_ref());
    stage(&mut changes, TaskField::Description, &current.description, update.description.as_ref());
    stage(&mut changes, TaskField::ScheduledAt, &current.scheduled_at, scheduled_at.as_ref());
    stage(&mut changes, TaskField::DeadlineAt, &current.deadline_at, deadline_at.as_ref());
    stage(
        &mut changes,
        TaskField::EstimateMinutes,
        &current.estimate_minutes,
        update.estimate_minutes.as_ref(),
    );
    stage(
        &mut changes,
        TaskField::ActualMinutes,
        &current.actual_minutes,
        update.actual_minutes.as_ref(),
    );
    stage(&mut changes, TaskField::Priority, &current.priority, update.priority.as_ref());
    stage(
        &mut changes,
        TaskField::RecurringRule,
        &current.recurring_rule,
        update.recurring_rule.as_ref(),
    );
    stage(&mut changes, TaskField::Completed, &current.completed, update.completed.as_ref());

    if let Some(completed) = update.completed {
        if completed != current.completed {
            let completed_at = completed.then_some(now);
            stage(&mut changes, TaskField::CompletedAt, &current.completed_at, Some(&completed_at));
        }
    }

    changes
}

/// `completed_at` may only move together with `completed`.
pub(crate) fn check_completion_coupling(changes: &[StagedChange]) -> Result<(), DatabaseError> {
    let has = |field| changes.iter().any(|c| c.field == field);
    if has(TaskField::CompletedAt) != has(TaskField::Completed) {
        return Err(DatabaseError::InvariantViolation(
            "completed and completed_at must change together".into(),
        ));
    }
    Ok(())
}

fn validate_minutes(field: &str, minutes: Option<i64>) -> Result<(), DatabaseError> {
    match minutes {
        Some(m) if m < 0 => Err(DatabaseError::Validation(format!(
            "{field} must not be negative (got {m})"
        ))),
        _ => Ok(()),
    }
}

fn validate_name(name: &str) -> Result<(), DatabaseError> {
    if name.trim().is_empty() {
        return Err(DatabaseError::Validation("task name must not be empty".into()));
    }
    Ok(())
}

impl PlanService {
    /// Create a task. No history is recorded for creation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for an empty name, negative
    /// minutes, or an unknown list.
    pub async fn create_task(&self, input: NewTask) -> Result<Task, DatabaseError> {
        validate_name(&input.name)?;
        validate_minutes("estimate_minutes", input.estimate_minutes)?;
        validate_minutes("actual_minutes", input.actual_minutes)?;
        if !self.list_exists(&input.list_id).await? {
            return Err(DatabaseError::Validation(format!(
                "list {} does not exist",
                input.list_id
            )));
        }

        let now = self.now();
        let id = self.db().generate_id(PREFIX_TASK).await?;
        let task = Task {
            id,
            list_id: input.list_id,
            name: input.name.trim().to_string(),
            description: empty_to_none(input.description),
            scheduled_at: input.scheduled_at.map(truncate_millis),
            deadline_at: input.deadline_at.map(truncate_millis),
            estimate_minutes: input.estimate_minutes,
            actual_minutes: input.actual_minutes,
            priority: input.priority,
            recurring_rule: empty_to_none(input.recurring_rule),
            completed: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO tasks ({}) VALUES \
                     (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                    Task::select_cols()
                ),
                libsql::params_from_iter(vec![
                    libsql::Value::from(task.id.as_str()),
                    task.list_id.as_str().into(),
                    task.name.as_str().into(),
                    task.description.clone().map_or(libsql::Value::Null, Into::into),
                    opt_datetime_to_sql(task.scheduled_at.as_ref()),
                    opt_datetime_to_sql(task.deadline_at.as_ref()),
                    task.estimate_minutes.map_or(libsql::Value::Null, Into::into),
                    task.actual_minutes.map_or(libsql::Value::Null, Into::into),
                    task.priority.as_str().into(),
                    task.recurring_rule.clone().map_or(libsql::Value::Null, Into::into),
                    libsql::Value::Integer(0),
                    libsql::Value::Null,
                    format_datetime(&now).into(),
                    format_datetime(&now).into(),
                    libsql::Value::Null,
                ]),
            )
            .await?;

        tracing::debug!(task_id = %task.id, list_id = %task.list_id, "task created");
        Ok(task)
    }

    /// Fetch a task in any soft-delete state.
    pub async fn get_task(&self, id: &str) -> Result<Option<Task>, DatabaseError> {
        self.db().find_by_id(id).await
    }

    /// Apply the supplied fields of `update`, recording one history row per
    /// field that actually changed.
    ///
    /// Returns `Ok(None)` for an unknown ID (deleted tasks still resolve).
    /// A patch that changes nothing returns the current task untouched:
    /// no `updated_at` bump, no history, no transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for invalid values, or a storage
    /// error after rolling back both the task row and its history.
    pub async fn update_task(
        &self,
        id: &str,
        update: TaskUpdate,
    ) -> Result<Option<Task>, DatabaseError> {
        if let Some(name) = update.name.as_deref() {
            validate_name(name)?;
        }
        validate_minutes("estimate_minutes", update.estimate_minutes.flatten())?;
        validate_minutes("actual_minutes", update.actual_minutes.flatten())?;

        let Some(current) = self.get_task(id).await? else {
            return Ok(None);
        };

        let update = TaskUpdate {
            name: update.name.map(|name| name.trim().to_string()),
            description: update.description.map(empty_to_none),
            recurring_rule: update.recurring_rule.map(empty_to_none),
            ..update
        };
        if let Some(list_id) = update.list_id.as_deref() {
            if list_id != current.list_id && !self.list_exists(list_id).await? {
                return Err(DatabaseError::Validation(format!(
                    "list {list_id} does not exist"
                )));
            }
        }

        let now = self.now();
        let changes = stage_changes(&current, &update, now);
        if changes.is_empty() {
            return Ok(Some(current));
        }
        check_completion_coupling(&changes)?;

        self.apply_changes(id, &changes, now).await?;
        self.get_task(id).await
    }

    /// Write staged changes, bump `updated_at`, and append their history,
    /// all in one transaction.
    pub(crate) async fn apply_changes(
        &self,
        id: &str,
        changes: &[StagedChange],
        now: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let mut sets = Vec::with_capacity(changes.len() + 1);
        let mut params: Vec<libsql::Value> = Vec::with_capacity(changes.len() + 2);

        for change in changes {
            params.push(field_value_to_sql(&change.new));
            sets.push(format!("{} = ?{}", change.field.as_str(), params.len()));
        }
        params.push(format_datetime(&now).into());
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(id.into());
        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );

        self.db()
            .transaction(|| async move {
                self.db()
                    .conn()
                    .execute(&sql, libsql::params_from_iter(params))
                    .await?;
                for change in changes {
                    self.append_change(id, change.field, &change.old, &change.new, now)
                        .await?;
                }
                Ok(())
            })
            .await?;

        tracing::debug!(task_id = id, fields = changes.len(), "task updated");
        Ok(())
    }

    pub async fn mark_complete(&self, id: &str) -> Result<Option<Task>, DatabaseError> {
        self.update_task(id, TaskUpdateBuilder::new().completed(true).build())
            .await
    }

    pub async fn mark_incomplete(&self, id: &str) -> Result<Option<Task>, DatabaseError> {
        self.update_task(id, TaskUpdateBuilder::new().completed(false).build())
            .await
    }

    /// Move a task to another list. The list must exist.
    pub async fn move_to_list(
        &self,
        id: &str,
        list_id: &str,
    ) -> Result<Option<Task>, DatabaseError> {
        self.update_task(id, TaskUpdateBuilder::new().list_id(list_id).build())
            .await
    }

    pub async fn set_priority(
        &self,
        id: &str,
        priority: Priority,
    ) -> Result<Option<Task>, DatabaseError> {
        self.update_task(id, TaskUpdateBuilder::new().priority(priority).build())
            .await
    }

    /// Set or clear the day a task is planned for (`scheduled_at`).
    pub async fn set_due_date(
        &self,
        id: &str,
        date: Option<DateTime<Utc>>,
    ) -> Result<Option<Task>, DatabaseError> {
        self.update_task(id, TaskUpdateBuilder::new().scheduled_at(date).build())
            .await
    }

    /// Set or clear the hard deadline (`deadline_at`).
    pub async fn set_deadline(
        &self,
        id: &str,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<Option<Task>, DatabaseError> {
        self.update_task(id, TaskUpdateBuilder::new().deadline_at(deadline).build())
            .await
    }
}
