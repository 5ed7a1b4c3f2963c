//! Task change history.
//!
//! Append-only rows, one per field transition, written only by the task
//! mutation paths of `PlanService` inside their transaction. Everything else
//! here is read-side, plus retention pruning.

use chrono::{DateTime, Utc};

use plan_core::entities::{ChangeRecord, FieldChangeCount};
use plan_core::enums::TaskField;
use plan_core::ids::PREFIX_CHANGE;
use plan_core::value::FieldValue;

use crate::entity::Entity;
use crate::error::DatabaseError;
use crate::helpers::{ceil_millis, format_datetime, get_count, get_datetime};
use crate::service::PlanService;

const NEWEST_FIRST: &str = "ORDER BY changed_at DESC, rowid DESC";

impl Entity for ChangeRecord {
    const TABLE: &'static str = "task_history";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "task_id",
        "field_name",
        "old_value",
        "new_value",
        "changed_at",
    ];

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            task_id: row.get(1)?,
            field_name: row.get(2)?,
            old_value: FieldValue::decode(row.get::<Option<String>>(3)?.as_deref())?,
            new_value: FieldValue::decode(row.get::<Option<String>>(4)?.as_deref())?,
            changed_at: get_datetime(row, 5)?,
        })
    }
}

impl PlanService {
    /// Record one field transition. No validation: the caller guarantees
    /// the value actually changed.
    pub(crate) async fn append_change(
        &self,
        task_id: &str,
        field: TaskField,
        old_value: &FieldValue,
        new_value: &FieldValue,
        changed_at: DateTime<Utc>,
    ) -> Result<ChangeRecord, DatabaseError> {
        let id = self.db().generate_id(PREFIX_CHANGE).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO task_history (id, task_id, field_name, old_value, new_value, changed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    task_id,
                    field.as_str(),
                    old_value.encode(),
                    new_value.encode(),
                    format_datetime(&changed_at)
                ],
            )
            .await?;

        Ok(ChangeRecord {
            id,
            task_id: task_id.to_string(),
            field_name: field.as_str().to_string(),
            old_value: old_value.clone(),
            new_value: new_value.clone(),
            changed_at,
        })
    }

    /// All changes for a task, newest first.
    pub async fn history_for_task(&self, task_id: &str) -> Result<Vec<ChangeRecord>, DatabaseError> {
        self.db()
            .query_entities(
                &format!(
                    "SELECT {} FROM task_history WHERE task_id = ?1 {NEWEST_FIRST}",
                    ChangeRecord::select_cols()
                ),
                vec![task_id.into()],
            )
            .await
    }

    /// Changes of one field of a task, newest first.
    pub async fn history_for_field(
        &self,
        task_id: &str,
        field: TaskField,
    ) -> Result<Vec<ChangeRecord>, DatabaseError> {
        self.db()
            .query_entities(
                &format!(
                    "SELECT {} FROM task_history WHERE task_id = ?1 AND field_name = ?2 {NEWEST_FIRST}",
                    ChangeRecord::select_cols()
                ),
                vec![task_id.into(), field.as_str().into()],
            )
            .await
    }

    /// Most recent changes across all tasks.
    pub async fn recent_changes(&self, limit: u32) -> Result<Vec<ChangeRecord>, DatabaseError> {
        self.db()
            .query_entities(
                &format!(
                    "SELECT {} FROM task_history {NEWEST_FIRST} LIMIT ?1",
                    ChangeRecord::select_cols()
                ),
                vec![i64::from(limit).into()],
            )
            .await
    }

    /// Changes with `from <= changed_at <= to`, newest first.
    pub async fn changes_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ChangeRecord>, DatabaseError> {
        self.db()
            .query_entities(
                &format!(
                    "SELECT {} FROM task_history WHERE changed_at >= ?1 AND changed_at <= ?2 {NEWEST_FIRST}",
                    ChangeRecord::select_cols()
                ),
                vec![
                    format_datetime(&ceil_millis(from)).into(),
                    format_datetime(&to).into(),
                ],
            )
            .await
    }

    pub async fn last_change(
        &self,
        task_id: &str,
        field: TaskField,
    ) -> Result<Option<ChangeRecord>, DatabaseError> {
        let mut changes = self
            .db()
            .query_entities(
                &format!(
                    "SELECT {} FROM task_history WHERE task_id = ?1 AND field_name = ?2 {NEWEST_FIRST} LIMIT 1",
                    ChangeRecord::select_cols()
                ),
                vec![task_id.into(), field.as_str().into()],
            )
            .await?;
        Ok(changes.pop())
    }

    /// Per-field change counts for a task: most-changed first, ties by name.
    pub async fn change_summary(
        &self,
        task_id: &str,
    ) -> Result<Vec<FieldChangeCount>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT field_name, COUNT(*) AS n FROM task_history
                 WHERE task_id = ?1
                 GROUP BY field_name
                 ORDER BY n DESC, field_name ASC",
                [task_id],
            )
            .await?;

        let mut summary = Vec::new();
        while let Some(row) = rows.next().await? {
            summary.push(FieldChangeCount {
                field_name: row.get(0)?,
                count: get_count(&row, 1)?,
            });
        }
        Ok(summary)
    }

    /// Hard-delete changes recorded strictly before `cutoff`.
    pub async fn prune_history_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM task_history WHERE changed_at < ?1",
                [format_datetime(&ceil_millis(cutoff))],
            )
            .await?;
        tracing::info!(removed, cutoff = %cutoff, "pruned task history");
        Ok(removed)
    }

    /// Remove every change of one task. Purge does not need this (the
    /// foreign key cascades); it exists for explicit cleanup.
    pub async fn delete_history_for_task(&self, task_id: &str) -> Result<u64, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute("DELETE FROM task_history WHERE task_id = ?1", [task_id])
            .await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::test_support::helpers::{t0, test_list, test_service};
    use crate::updates::task::{NewTask, TaskUpdateBuilder};
    use chrono::Duration;
    use plan_core::enums::Priority;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn append_roundtrips_typed_values() {
        let (svc, _) = test_service().await;
        let list = test_list(&svc).await;
        let task = svc.create_task(NewTask::new(&list, "Read")).await.unwrap();

        svc.append_change(
            &task.id,
            TaskField::EstimateMinutes,
            &FieldValue::Null,
            &FieldValue::Integer(25),
            t0(),
        )
        .await
        .unwrap();

        let history = svc.history_for_task(&task.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].field_name, "estimate_minutes");
        assert_eq!(history[0].old_value, FieldValue::Null);
        assert_eq!(history[0].new_value, FieldValue::Integer(25));
        assert_eq!(history[0].changed_at, t0());
    }

    #[tokio::test]
    async fn null_is_stored_as_sql_null() {
        let (svc, _) = test_service().await;
        let list = test_list(&svc).await;
        let task = svc.create_task(NewTask::new(&list, "Read")).await.unwrap();
        svc.update_task(&task.id, TaskUpdateBuilder::new().description(Some("x".into())).build())
            .await
            .unwrap();

        let mut rows = svc
            .db()
            .conn()
            .query(
                "SELECT old_value IS NULL, new_value FROM task_history WHERE task_id = ?1",
                [task.id.as_str()],
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
        assert_eq!(row.get::<String>(1).unwrap(), "\"x\"");
    }

    #[tokio::test]
    async fn queries_are_newest_first_and_filtered() {
        let (svc, clock) = test_service().await;
        let list = test_list(&svc).await;
        let task = svc.create_task(NewTask::new(&list, "Plan trip")).await.unwrap();

        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            clock.advance(Duration::minutes(1));
            svc.set_priority(&task.id, priority).await.unwrap();
        }
        clock.advance(Duration::minutes(1));
        svc.update_task(&task.id, TaskUpdateBuilder::new().name("Plan holiday").build())
            .await
            .unwrap();

        let all = svc.history_for_task(&task.id).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].field_name, "name");

        let priority = svc.history_for_field(&task.id, TaskField::Priority).await.unwrap();
        let values: Vec<_> = priority.iter().map(|c| c.new_value.clone()).collect();
        assert_eq!(
            values,
            vec![
                FieldValue::Text("high".into()),
                FieldValue::Text("medium".into()),
                FieldValue::Text("low".into()),
            ]
        );

        let last = svc.last_change(&task.id, TaskField::Priority).await.unwrap().unwrap();
        assert_eq!(last.old_value, FieldValue::Text("medium".into()));
        assert!(svc.last_change(&task.id, TaskField::Description).await.unwrap().is_none());

        let recent = svc.recent_changes(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].field_name, "name");
    }

    #[tokio::test]
    async fn date_range_is_inclusive() {
        let (svc, clock) = test_service().await;
        let list = test_list(&svc).await;
        let task = svc.create_task(NewTask::new(&list, "Stretch")).await.unwrap();

        let mut stamps = Vec::new();
        for minutes in [10, 20, 30] {
            clock.set(t0() + Duration::minutes(minutes));
            stamps.push(clock.now());
            svc.update_task(
                &task.id,
                TaskUpdateBuilder::new().estimate_minutes(Some(minutes)).build(),
            )
            .await
            .unwrap();
        }

        let hits = svc.changes_between(stamps[0], stamps[1]).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].changed_at, stamps[1]);
        assert_eq!(hits[1].changed_at, stamps[0]);
    }

    #[tokio::test]
    async fn summary_sorts_by_count_then_name() {
        let (svc, _) = test_service().await;
        let list = test_list(&svc).await;
        let task = svc.create_task(NewTask::new(&list, "Laundry")).await.unwrap();

        svc.mark_complete(&task.id).await.unwrap();
        svc.mark_incomplete(&task.id).await.unwrap();
        svc.set_priority(&task.id, Priority::High).await.unwrap();

        let summary = svc.change_summary(&task.id).await.unwrap();
        let pairs: Vec<_> = summary
            .iter()
            .map(|s| (s.field_name.as_str(), s.count))
            .collect();
        assert_eq!(pairs, vec![("completed", 2), ("completed_at", 2), ("priority", 1)]);
    }

    #[tokio::test]
    async fn prune_removes_strictly_older_entries() {
        let (svc, clock) = test_service().await;
        let list = test_list(&svc).await;
        let task = svc.create_task(NewTask::new(&list, "Archive")).await.unwrap();

        svc.set_priority(&task.id, Priority::Low).await.unwrap();
        clock.advance(Duration::days(30));
        let cutoff = clock.now();
        svc.set_priority(&task.id, Priority::High).await.unwrap();

        let removed = svc.prune_history_older_than(cutoff).await.unwrap();
        assert_eq!(removed, 1);
        let left = svc.history_for_task(&task.id).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].changed_at, cutoff);
    }

    #[tokio::test]
    async fn sub_millisecond_cutoffs_compare_like_memory() {
        let (svc, clock) = test_service().await;
        let list = test_list(&svc).await;
        let task = svc.create_task(NewTask::new(&list, "Archive")).await.unwrap();

        clock.set(t0() + Duration::milliseconds(500));
        let changed_at = clock.now();
        svc.set_priority(&task.id, Priority::High).await.unwrap();
        let later = changed_at + Duration::microseconds(700);

        let window = svc
            .changes_between(later, later + Duration::seconds(1))
            .await
            .unwrap();
        assert!(window.is_empty());
        assert_eq!(svc.changes_between(changed_at, later).await.unwrap().len(), 1);

        assert_eq!(svc.prune_history_older_than(later).await.unwrap(), 1);
        assert!(svc.history_for_task(&task.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_for_task_counts_rows() {
        let (svc, _) = test_service().await;
        let list = test_list(&svc).await;
        let task = svc.create_task(NewTask::new(&list, "Sweep")).await.unwrap();
        svc.mark_complete(&task.id).await.unwrap();

        assert_eq!(svc.delete_history_for_task(&task.id).await.unwrap(), 2);
        assert!(svc.history_for_task(&task.id).await.unwrap().is_empty());
    }
}
