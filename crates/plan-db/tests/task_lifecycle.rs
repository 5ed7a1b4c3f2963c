//! End-to-end task lifecycle scenarios across the task, history and trash
//! repositories.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use plan_core::enums::{Priority, TaskField};
use plan_core::value::FieldValue;
use plan_db::PlanDb;
use plan_db::clock::ManualClock;
use plan_db::error::DatabaseError;
use plan_db::repos::query::TaskFilter;
use plan_db::service::PlanService;
use plan_db::updates::task::{NewTask, TaskUpdateBuilder};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap()
}

async fn service() -> (PlanService, Arc<ManualClock>, String) {
    let db = PlanDb::open_local(":memory:").await.unwrap();
    let clock = ManualClock::new(start());
    let svc = PlanService::from_db(db, clock.clone());
    let list = svc.default_list().await.unwrap().id;
    (svc, clock, list)
}

async fn history_rows(svc: &PlanService) -> i64 {
    let mut rows = svc
        .db()
        .conn()
        .query("SELECT COUNT(*) FROM task_history", ())
        .await
        .unwrap();
    rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
}

#[tokio::test]
async fn failed_history_write_rolls_back_the_update() {
    let (svc, clock, list) = service().await;
    let task = svc
        .create_task(NewTask::new(&list, "Renew passport").priority(Priority::Low))
        .await
        .unwrap();

    svc.db()
        .conn()
        .execute(
            "CREATE TRIGGER fail_history BEFORE INSERT ON task_history \
             BEGIN SELECT RAISE(ABORT, 'forced'); END",
            (),
        )
        .await
        .unwrap();

    clock.advance(Duration::minutes(5));
    let result = svc
        .update_task(
            &task.id,
            TaskUpdateBuilder::new()
                .name("Renew passport now")
                .priority(Priority::High)
                .build(),
        )
        .await;
    assert!(matches!(result, Err(DatabaseError::Storage(_))));

    let unchanged = svc.get_task(&task.id).await.unwrap().unwrap();
    assert_eq!(unchanged, task);
    assert_eq!(history_rows(&svc).await, 0);
    assert!(!svc.db().in_transaction());

    svc.db()
        .conn()
        .execute("DROP TRIGGER fail_history", ())
        .await
        .unwrap();
    let updated = svc
        .set_priority(&task.id, Priority::High)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(history_rows(&svc).await, 1);
}

#[tokio::test]
async fn priority_and_completion_produce_three_records() {
    let (svc, clock, list) = service().await;
    let task = svc.create_task(NewTask::new(&list, "File taxes")).await.unwrap();

    clock.advance(Duration::hours(1));
    let done = svc
        .update_task(
            &task.id,
            TaskUpdateBuilder::new()
                .priority(Priority::High)
                .completed(true)
                .build(),
        )
        .await
        .unwrap()
        .unwrap();

    let history = svc.history_for_task(&task.id).await.unwrap();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|c| c.changed_at == start() + Duration::hours(1)));
    assert!(done.updated_at > task.updated_at);

    let summary = svc.change_summary(&task.id).await.unwrap();
    assert_eq!(summary.len(), 3);
    assert!(summary.iter().all(|s| s.count == 1));
}

#[tokio::test]
async fn soft_delete_restore_round_trip() {
    let (svc, clock, list) = service().await;
    let task = svc.create_task(NewTask::new(&list, "Water plants")).await.unwrap();

    clock.advance(Duration::minutes(1));
    let deleted = svc.soft_delete_task(&task.id).await.unwrap().unwrap();
    let ts = deleted.deleted_at.unwrap();
    assert!(svc.find_tasks(&TaskFilter::default()).await.unwrap().is_empty());
    assert_eq!(svc.find_deleted().await.unwrap().len(), 1);

    clock.advance(Duration::minutes(1));
    svc.restore_task(&task.id).await.unwrap().unwrap();

    let visible = svc.find_tasks(&TaskFilter::default()).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].deleted_at, None);

    let mut transitions: Vec<_> = svc
        .history_for_field(&task.id, TaskField::DeletedAt)
        .await
        .unwrap()
        .into_iter()
        .map(|c| (c.old_value, c.new_value))
        .collect();
    transitions.reverse();
    assert_eq!(
        transitions,
        vec![
            (FieldValue::Null, FieldValue::from(ts)),
            (FieldValue::from(ts), FieldValue::Null),
        ]
    );
}

#[tokio::test]
async fn completion_pair_never_disagrees() {
    let (svc, clock, list) = service().await;
    let task = svc.create_task(NewTask::new(&list, "Stand-up")).await.unwrap();

    for step in 0..4 {
        clock.advance(Duration::minutes(1));
        let next = if step % 2 == 0 {
            svc.mark_complete(&task.id).await
        } else {
            svc.mark_incomplete(&task.id).await
        };
        let current = next.unwrap().unwrap();
        assert_eq!(current.completed, current.completed_at.is_some());
    }

    let mut rows = svc
        .db()
        .conn()
        .query(
            "SELECT COUNT(*) FROM tasks WHERE (completed = 1) != (completed_at IS NOT NULL)",
            (),
        )
        .await
        .unwrap();
    let bad: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
    assert_eq!(bad, 0);
    assert_eq!(
        svc.history_for_field(&task.id, TaskField::Completed)
            .await
            .unwrap()
            .len(),
        4
    );
}

#[tokio::test]
async fn purge_removes_history_with_the_task() {
    let (svc, _, list) = service().await;
    let task = svc.create_task(NewTask::new(&list, "Old idea")).await.unwrap();
    svc.set_priority(&task.id, Priority::Medium).await.unwrap();
    svc.soft_delete_task(&task.id).await.unwrap();
    assert_eq!(history_rows(&svc).await, 2);

    assert!(svc.purge_task(&task.id).await.unwrap());
    assert_eq!(history_rows(&svc).await, 0);
    assert!(svc.find_task_with_relations(&task.id).await.unwrap().is_none());
}
