//! Read-only assembly of a task with its related collections.

use plan_core::entities::{Attachment, Label, Reminder, Subtask, TaskWithRelations};

use crate::entity::Entity;
use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_datetime, get_opt_string};
use crate::service::PlanService;

impl Entity for Subtask {
    const TABLE: &'static str = "subtasks";
    const COLUMNS: &'static [&'static str] =
        &["id", "task_id", "name", "completed", "position", "created_at"];

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            task_id: row.get(1)?,
            name: row.get(2)?,
            completed: get_bool(row, 3)?,
            position: row.get(4)?,
            created_at: get_datetime(row, 5)?,
        })
    }
}

impl Entity for Reminder {
    const TABLE: &'static str = "reminders";
    const COLUMNS: &'static [&'static str] = &["id", "task_id", "remind_at", "sent", "created_at"];

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            task_id: row.get(1)?,
            remind_at: get_datetime(row, 2)?,
            sent: get_bool(row, 3)?,
            created_at: get_datetime(row, 4)?,
        })
    }
}

impl Entity for Attachment {
    const TABLE: &'static str = "attachments";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "task_id",
        "file_name",
        "file_path",
        "mime_type",
        "size_bytes",
        "created_at",
    ];

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            task_id: row.get(1)?,
            file_name: row.get(2)?,
            file_path: row.get(3)?,
            mime_type: get_opt_string(row, 4)?,
            size_bytes: row.get(5)?,
            created_at: get_datetime(row, 6)?,
        })
    }
}

impl PlanService {
    /// Load a task (any soft-delete state) with its list, subtasks (by
    /// position), labels (by name), reminders (by trigger time) and
    /// attachments (newest first).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any of the queries fail.
    pub async fn find_task_with_relations(
        &self,
        id: &str,
    ) -> Result<Option<TaskWithRelations>, DatabaseError> {
        let Some(task) = self.get_task(id).await? else {
            return Ok(None);
        };
        let list = self.get_list(&task.list_id).await?;

        let subtasks = self
            .db()
            .query_entities(
                &format!(
                    "SELECT {} FROM subtasks WHERE task_id = ?1 \
                     ORDER BY position ASC, created_at ASC",
                    Subtask::select_cols()
                ),
                vec![id.into()],
            )
            .await?;
        let labels = self
            .db()
            .query_entities(
                &format!(
                    "SELECT {} FROM labels l \
                     JOIN task_labels tl ON tl.label_id = l.id \
                     WHERE tl.task_id = ?1 ORDER BY l.name ASC",
                    Label::qualified_cols("l")
                ),
                vec![id.into()],
            )
            .await?;
        let reminders = self
            .db()
            .query_entities(
                &format!(
                    "SELECT {} FROM reminders WHERE task_id = ?1 ORDER BY remind_at ASC",
                    Reminder::select_cols()
                ),
                vec![id.into()],
            )
            .await?;
        let attachments = self
            .db()
            .query_entities(
                &format!(
                    "SELECT {} FROM attachments WHERE task_id = ?1 \
                     ORDER BY created_at DESC, rowid DESC",
                    Attachment::select_cols()
                ),
                vec![id.into()],
            )
            .await?;

        Ok(Some(TaskWithRelations {
            task,
            list,
            subtasks,
            labels,
            reminders,
            attachments,
        }))
    }
}
