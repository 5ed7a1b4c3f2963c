//! Filtered and paginated task retrieval.
//!
//! Filters compose with AND. Soft-delete visibility defaults to active only;
//! `deleted_only` wins over `include_deleted` when both are set.

use chrono::{DateTime, Utc};

use plan_core::entities::Task;
use plan_core::enums::Priority;
use plan_core::responses::{PageResult, page_offset};

use crate::entity::Entity;
use crate::error::DatabaseError;
use crate::helpers::{ceil_millis, contains_pattern, format_datetime, truncate_millis};
use crate::service::PlanService;

/// `scheduled_at` ascending with unscheduled tasks last, newest first within
/// the same date.
const TASK_ORDER: &str =
    "ORDER BY scheduled_at IS NULL, scheduled_at ASC, created_at DESC, rowid DESC";

/// Filter criteria for task queries. Unset fields do not constrain.
#[derive(Debug, Default, Clone)]
pub struct TaskFilter {
    pub include_deleted: bool,
    pub deleted_only: bool,
    pub list_id: Option<String>,
    /// Inclusive lower bound on `scheduled_at`.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `scheduled_at`.
    pub date_to: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    /// Deadline already passed and not completed.
    pub overdue: bool,
    /// Literal substring of name or description (ASCII case-insensitive).
    pub search: Option<String>,
    pub label_id: Option<String>,
}

impl TaskFilter {
    /// Build the `WHERE` clause and its positional parameters.
    fn where_clause(&self, now: DateTime<Utc>) -> (String, Vec<libsql::Value>) {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if self.deleted_only {
            conditions.push("deleted_at IS NOT NULL".to_string());
        } else if !self.include_deleted {
            conditions.push("deleted_at IS NULL".to_string());
        }
        if let Some(ref list_id) = self.list_id {
            params.push(libsql::Value::Text(list_id.clone()));
            conditions.push(format!("list_id = ?{}", params.len()));
        }
        if let Some(from) = self.date_from {
            params.push(format_datetime(&ceil_millis(from)).into());
            conditions.push(format!("scheduled_at >= ?{}", params.len()));
        }
        if let Some(to) = self.date_to {
            params.push(format_datetime(&truncate_millis(to)).into());
            conditions.push(format!("scheduled_at <= ?{}", params.len()));
        }
        if let Some(completed) = self.completed {
            params.push(libsql::Value::Integer(i64::from(completed)));
            conditions.push(format!("completed = ?{}", params.len()));
        }
        if let Some(priority) = self.priority {
            params.push(libsql::Value::Text(priority.as_str().to_string()));
            conditions.push(format!("priority = ?{}", params.len()));
        }
        if self.overdue {
            params.push(format_datetime(&ceil_millis(now)).into());
            conditions.push(format!(
                "deadline_at IS NOT NULL AND deadline_at < ?{} AND completed = 0",
                params.len()
            ));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(libsql::Value::Text(contains_pattern(search)));
            let n = params.len();
            conditions.push(format!(
                "(name LIKE ?{n} ESCAPE '\\' OR description LIKE ?{n} ESCAPE '\\')"
            ));
        }
        if let Some(ref label_id) = self.label_id {
            params.push(libsql::Value::Text(label_id.clone()));
            conditions.push(format!(
                "id IN (SELECT task_id FROM task_labels WHERE label_id = ?{})",
                params.len()
            ));
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (clause, params)
    }
}

impl PlanService {
    /// Every task matching `filter`, in display order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, DatabaseError> {
        let (where_clause, params) = filter.where_clause(self.now());
        let sql = format!(
            "SELECT {} FROM tasks {where_clause} {TASK_ORDER}",
            Task::select_cols()
        );
        self.db().query_entities(&sql, params).await
    }

    /// One page of [`Self::find_tasks`]. `page` is 1-indexed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if `page` or `limit` is zero.
    pub async fn find_tasks_paginated(
        &self,
        filter: &TaskFilter,
        page: u32,
        limit: u32,
    ) -> Result<PageResult<Task>, DatabaseError> {
        if page < 1 {
            return Err(DatabaseError::Validation(format!(
                "page must be at least 1 (got {page})"
            )));
        }
        if limit < 1 {
            return Err(DatabaseError::Validation(format!(
                "limit must be at least 1 (got {limit})"
            )));
        }

        // One `now` for both statements so `overdue` cannot drift between them.
        let (where_clause, params) = filter.where_clause(self.now());
        let total = self
            .db()
            .query_count(
                &format!("SELECT COUNT(*) FROM tasks {where_clause}"),
                params.clone(),
            )
            .await?;

        let mut params = params;
        params.push(libsql::Value::Integer(i64::from(limit)));
        let limit_idx = params.len();
        params.push(libsql::Value::Integer(
            i64::try_from(page_offset(page, limit)).unwrap_or(i64::MAX),
        ));
        let offset_idx = params.len();
        let sql = format!(
            "SELECT {} FROM tasks {where_clause} {TASK_ORDER} LIMIT ?{limit_idx} OFFSET ?{offset_idx}",
            Task::select_cols()
        );
        let data = self.db().query_entities(&sql, params).await?;

        Ok(PageResult::new(data, total, page, limit))
    }
}
