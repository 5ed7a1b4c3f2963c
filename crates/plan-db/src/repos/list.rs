//! Task list repository. Lists own tasks; the store only needs to create
//! them, look them up, and answer "does this list exist".

use plan_core::entities::TaskList;
use plan_core::ids::PREFIX_LIST;

use crate::entity::Entity;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_bool, get_datetime, get_opt_string};
use crate::service::PlanService;

/// Name given to the list created by [`PlanService::default_list`].
pub const DEFAULT_LIST_NAME: &str = "Inbox";

impl Entity for TaskList {
    const TABLE: &'static str = "task_lists";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "color", "is_default", "created_at", "updated_at"];

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            color: get_opt_string(row, 2)?,
            is_default: get_bool(row, 3)?,
            created_at: get_datetime(row, 4)?,
            updated_at: get_datetime(row, 5)?,
        })
    }
}

impl PlanService {
    pub async fn create_list(
        &self,
        name: &str,
        color: Option<&str>,
    ) -> Result<TaskList, DatabaseError> {
        self.insert_list(name, color, false).await
    }

    async fn insert_list(
        &self,
        name: &str,
        color: Option<&str>,
        is_default: bool,
    ) -> Result<TaskList, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::Validation("list name must not be empty".into()));
        }

        let now = self.now();
        let id = self.db().generate_id(PREFIX_LIST).await?;
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO task_lists ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    TaskList::select_cols()
                ),
                libsql::params![
                    id.as_str(),
                    name,
                    color,
                    i64::from(is_default),
                    format_datetime(&now),
                    format_datetime(&now)
                ],
            )
            .await?;

        Ok(TaskList {
            id,
            name: name.to_string(),
            color: color.map(String::from),
            is_default,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_list(&self, id: &str) -> Result<Option<TaskList>, DatabaseError> {
        self.db().find_by_id(id).await
    }

    pub async fn list_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        Ok(self.db().count_by::<TaskList>("id", id).await? > 0)
    }

    /// All lists, default list first, then by name.
    pub async fn all_lists(&self) -> Result<Vec<TaskList>, DatabaseError> {
        self.db()
            .query_entities(
                &format!(
                    "SELECT {} FROM task_lists ORDER BY is_default DESC, name",
                    TaskList::select_cols()
                ),
                Vec::new(),
            )
            .await
    }

    /// The list flagged as default, created as "Inbox" on first use.
    pub async fn default_list(&self) -> Result<TaskList, DatabaseError> {
        let existing = self.db().find_by::<TaskList>("is_default", 1_i64).await?;
        if let Some(list) = existing.into_iter().next() {
            return Ok(list);
        }
        tracing::debug!("creating default list");
        self.insert_list(DEFAULT_LIST_NAME, None, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_get_list() {
        let (svc, _) = test_service().await;
        let list = svc.create_list("  Groceries ", Some("#00ff00")).await.unwrap();
        assert!(list.id.starts_with("lst-"));
        assert_eq!(list.name, "Groceries");

        let fetched = svc.get_list(&list.id).await.unwrap().unwrap();
        assert_eq!(fetched, list);
        assert!(svc.list_exists(&list.id).await.unwrap());
        assert!(!svc.list_exists("lst-missing").await.unwrap());
    }

    #[tokio::test]
    async fn empty_list_name_rejected() {
        let (svc, _) = test_service().await;
        let result = svc.create_list("   ", None).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn default_list_is_created_once() {
        let (svc, _) = test_service().await;
        let first = svc.default_list().await.unwrap();
        let second = svc.default_list().await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.name, DEFAULT_LIST_NAME);
        assert!(first.is_default);

        svc.create_list("Work", None).await.unwrap();
        let lists = svc.all_lists().await.unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].id, first.id);
    }
}
