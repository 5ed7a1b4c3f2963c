//! Labels and the task-label association. The association is what the
//! `label_id` filter queries against.

use plan_core::entities::{Label, Task};
use plan_core::ids::PREFIX_LABEL;

use crate::entity::Entity;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_datetime, get_opt_string};
use crate::service::PlanService;

impl Entity for Label {
    const TABLE: &'static str = "labels";
    const COLUMNS: &'static [&'static str] = &["id", "name", "color", "created_at"];

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            color: get_opt_string(row, 2)?,
            created_at: get_datetime(row, 3)?,
        })
    }
}

impl PlanService {
    pub async fn create_label(
        &self,
        name: &str,
        color: Option<&str>,
    ) -> Result<Label, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::Validation("label name must not be empty".into()));
        }
        if self.db().count_by::<Label>("name", name).await? > 0 {
            return Err(DatabaseError::Validation(format!("label '{name}' already exists")));
        }

        let now = self.now();
        let id = self.db().generate_id(PREFIX_LABEL).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO labels (id, name, color, created_at) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), name, color, format_datetime(&now)],
            )
            .await?;

        Ok(Label {
            id,
            name: name.to_string(),
            color: color.map(String::from),
            created_at: now,
        })
    }

    pub async fn get_label(&self, id: &str) -> Result<Option<Label>, DatabaseError> {
        self.db().find_by_id(id).await
    }

    /// Attach a label to a task. Attaching twice is a no-op.
    pub async fn attach_label(&self, task_id: &str, label_id: &str) -> Result<(), DatabaseError> {
        if self.db().count_by::<Task>("id", task_id).await? == 0 {
            return Err(DatabaseError::Validation(format!("task {task_id} does not exist")));
        }
        if self.db().count_by::<Label>("id", label_id).await? == 0 {
            return Err(DatabaseError::Validation(format!("label {label_id} does not exist")));
        }
        self.db()
            .conn()
            .execute(
                "INSERT OR IGNORE INTO task_labels (task_id, label_id) VALUES (?1, ?2)",
                [task_id, label_id],
            )
            .await?;
        Ok(())
    }

    /// Returns whether the association existed.
    pub async fn detach_label(&self, task_id: &str, label_id: &str) -> Result<bool, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM task_labels WHERE task_id = ?1 AND label_id = ?2",
                [task_id, label_id],
            )
            .await?;
        Ok(removed > 0)
    }
}
