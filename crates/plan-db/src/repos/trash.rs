//! Soft delete, restore, and purge.
//!
//! ```text
//! active (deleted_at NULL) --soft_delete--> deleted (deleted_at set)
//! deleted --restore--> active
//! deleted --purge--> row removed (history and children cascade)
//! ```
//!
//! Soft delete and restore go through the same staged-change path as
//! `update_task`, so each records one `deleted_at` history row. Purge never
//! touches active tasks.

use chrono::{DateTime, Utc};

use plan_core::entities::Task;
use plan_core::enums::TaskField;
use plan_core::value::FieldValue;

use crate::entity::Entity;
use crate::error::DatabaseError;
use crate::helpers::{ceil_millis, format_datetime};
use crate::repos::task::StagedChange;
use crate::service::PlanService;

impl PlanService {
    /// Mark a task deleted. Returns `Ok(None)` for an unknown ID; a task that
    /// is already deleted is returned unchanged. Completion is not touched.
    pub async fn soft_delete_task(&self, id: &str) -> Result<Option<Task>, DatabaseError> {
        let Some(current) = self.get_task(id).await? else {
            return Ok(None);
        };
        if current.is_deleted() {
            return Ok(Some(current));
        }

        let now = self.now();
        let change = StagedChange {
            field: TaskField::DeletedAt,
            old: FieldValue::Null,
            new: FieldValue::from(now),
        };
        self.apply_changes(id, &[change], now).await?;
        tracing::debug!(task_id = id, "task soft-deleted");
        self.get_task(id).await
    }

    /// Bring a soft-deleted task back. Active tasks are returned unchanged.
    pub async fn restore_task(&self, id: &str) -> Result<Option<Task>, DatabaseError> {
        let Some(current) = self.get_task(id).await? else {
            return Ok(None);
        };
        let Some(deleted_at) = current.deleted_at else {
            return Ok(Some(current));
        };

        let now = self.now();
        let change = StagedChange {
            field: TaskField::DeletedAt,
            old: FieldValue::from(deleted_at),
            new: FieldValue::Null,
        };
        self.apply_changes(id, &[change], now).await?;
        tracing::debug!(task_id = id, "task restored");
        self.get_task(id).await
    }

    /// Permanently remove one soft-deleted task. Returns `false` if the ID is
    /// unknown or the task is active.
    ///
    /// History, subtasks, reminders, attachments and label links go with it
    /// through `ON DELETE CASCADE`.
    pub async fn purge_task(&self, id: &str) -> Result<bool, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM tasks WHERE id = ?1 AND deleted_at IS NOT NULL",
                [id],
            )
            .await?;
        if removed > 0 {
            tracing::info!(task_id = id, "task purged");
        }
        Ok(removed > 0)
    }

    /// Permanently remove every soft-deleted task.
    pub async fn purge_all_deleted(&self) -> Result<u64, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute("DELETE FROM tasks WHERE deleted_at IS NOT NULL", ())
            .await?;
        tracing::info!(removed, "purged all deleted tasks");
        Ok(removed)
    }

    /// Permanently remove tasks soft-deleted strictly before `cutoff`.
    pub async fn purge_deleted_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM tasks WHERE deleted_at IS NOT NULL AND deleted_at < ?1",
                [format_datetime(&ceil_millis(cutoff))],
            )
            .await?;
        tracing::info!(removed, cutoff = %cutoff, "purged old deleted tasks");
        Ok(removed)
    }

    /// Soft-deleted tasks, most recently deleted first.
    pub async fn find_deleted(&self) -> Result<Vec<Task>, DatabaseError> {
        self.db()
            .query_entities(
                &format!(
                    "SELECT {} FROM tasks WHERE deleted_at IS NOT NULL \
                     ORDER BY deleted_at DESC, rowid DESC",
                    Task::select_cols()
                ),
                Vec::new(),
            )
            .await
    }

    pub async fn find_deleted_by_list(&self, list_id: &str) -> Result<Vec<Task>, DatabaseError> {
        self.db()
            .query_entities(
                &format!(
                    "SELECT {} FROM tasks WHERE deleted_at IS NOT NULL AND list_id = ?1 \
                     ORDER BY deleted_at DESC, rowid DESC",
                    Task::select_cols()
                ),
                vec![list_id.into()],
            )
            .await
    }
}
