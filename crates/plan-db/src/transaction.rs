//! Atomic write scopes.
//!
//! The outermost [`PlanDb::transaction`] call wraps its closure in
//! `BEGIN IMMEDIATE` / `COMMIT`; nested calls become savepoints, so nothing
//! is committed until the outermost scope succeeds. An `Err` from the closure
//! rolls back its scope and is returned unchanged.

use std::future::Future;
use std::sync::atomic::Ordering;

use crate::PlanDb;
use crate::error::DatabaseError;

/// Decrements the nesting depth even if the scope's future is dropped.
struct DepthGuard<'a> {
    db: &'a PlanDb,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.db.tx_depth.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PlanDb {
    /// Run `f` so that all of its writes commit together or not at all.
    ///
    /// # Errors
    ///
    /// Returns the closure's error after rolling back, or
    /// `DatabaseError::Storage` if BEGIN/COMMIT itself fails.
    pub async fn transaction<T, F, Fut>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, DatabaseError>>,
    {
        let depth = self.tx_depth.fetch_add(1, Ordering::SeqCst);
        let _guard = DepthGuard { db: self };
        let savepoint = format!("plan_sp_{depth}");

        if depth == 0 {
            if !self.conn.is_autocommit() {
                // A scope was abandoned mid-flight (its future was dropped).
                tracing::warn!("rolling back transaction left open by a cancelled caller");
                self.conn.execute("ROLLBACK", ()).await?;
            }
            self.conn.execute("BEGIN IMMEDIATE", ()).await?;
        } else {
            self.conn.execute(&format!("SAVEPOINT {savepoint}"), ()).await?;
        }

        match f().await {
            Ok(value) => {
                let commit = if depth == 0 {
                    self.conn.execute("COMMIT", ()).await
                } else {
                    self.conn.execute(&format!("RELEASE {savepoint}"), ()).await
                };
                if let Err(e) = commit {
                    self.rollback_scope(depth, &savepoint).await;
                    return Err(e.into());
                }
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(depth, error = %e, "rolling back transaction");
                self.rollback_scope(depth, &savepoint).await;
                Err(e)
            }
        }
    }

    async fn rollback_scope(&self, depth: usize, savepoint: &str) {
        let result = if depth == 0 {
            self.conn.execute("ROLLBACK", ()).await
        } else {
            match self
                .conn
                .execute(&format!("ROLLBACK TO {savepoint}"), ())
                .await
            {
                Ok(_) => self.conn.execute(&format!("RELEASE {savepoint}"), ()).await,
                Err(e) => Err(e),
            }
        };
        if let Err(e) = result {
            tracing::warn!(depth, error = %e, "rollback failed");
        }
    }

    /// Whether a transaction scope is currently open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.tx_depth.load(Ordering::SeqCst) > 0
    }
}

#[cfg(test)]
mod tests {
    use crate::PlanDb;
    use crate::error::DatabaseError;

    async fn db_with_counters() -> PlanDb {
        let db = PlanDb::open_local(":memory:").await.unwrap();
        db.conn()
            .execute("CREATE TABLE counters (name TEXT PRIMARY KEY, val INTEGER)", ())
            .await
            .unwrap();
        db
    }

    async fn names(db: &PlanDb) -> Vec<String> {
        let mut rows = db
            .conn()
            .query("SELECT name FROM counters ORDER BY name", ())
            .await
            .unwrap();
        let mut names = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            names.push(row.get::<String>(0).unwrap());
        }
        names
    }

    async fn insert(db: &PlanDb, name: &str) -> Result<(), DatabaseError> {
        db.conn()
            .execute(
                "INSERT INTO counters (name, val) VALUES (?1, 1)",
                [name],
            )
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn commit_persists() {
        let db = db_with_counters().await;
        db.transaction(|| async { insert(&db, "committed").await })
            .await
            .unwrap();
        assert_eq!(names(&db).await, vec!["committed"]);
        assert!(!db.in_transaction());
    }

    #[tokio::test]
    async fn error_rolls_back() {
        let db = db_with_counters().await;
        let result: Result<(), _> = db
            .transaction(|| async {
                insert(&db, "rolled_back").await?;
                Err(DatabaseError::Validation("boom".into()))
            })
            .await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
        assert!(names(&db).await.is_empty());
        assert!(!db.in_transaction());
    }

    #[tokio::test]
    async fn nested_scopes_commit_with_outer() {
        let db = db_with_counters().await;
        db.transaction(|| async {
            insert(&db, "outer").await?;
            db.transaction(|| async { insert(&db, "inner").await }).await
        })
        .await
        .unwrap();
        assert_eq!(names(&db).await, vec!["inner", "outer"]);
    }

    #[tokio::test]
    async fn outer_failure_discards_committed_inner_scope() {
        let db = db_with_counters().await;
        let result: Result<(), _> = db
            .transaction(|| async {
                db.transaction(|| async { insert(&db, "inner").await }).await?;
                Err(DatabaseError::Validation("late failure".into()))
            })
            .await;
        assert!(result.is_err());
        assert!(names(&db).await.is_empty());
    }

    #[tokio::test]
    async fn inner_failure_can_be_recovered_by_outer() {
        let db = db_with_counters().await;
        db.transaction(|| async {
            insert(&db, "kept").await?;
            let inner: Result<(), _> = db
                .transaction(|| async {
                    insert(&db, "dropped").await?;
                    Err(DatabaseError::Validation("inner".into()))
                })
                .await;
            assert!(inner.is_err());
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(names(&db).await, vec!["kept"]);
    }

    #[tokio::test]
    async fn storage_error_inside_scope_rolls_back() {
        let db = db_with_counters().await;
        let result = db
            .transaction(|| async {
                insert(&db, "dup").await?;
                insert(&db, "dup").await
            })
            .await;
        let err = result.unwrap_err();
        assert!(err.is_retryable(), "storage faults are retryable: {err}");
        assert!(names(&db).await.is_empty());
    }
}
