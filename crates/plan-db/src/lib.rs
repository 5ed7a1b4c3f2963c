//! # plan-db
//!
//! libSQL storage for the planner: tasks, their lists and labels, and the
//! per-field change history recorded for every task mutation.
//!
//! - [`PlanDb`] owns the connection and the generic entity primitives
//!   (ID generation, find/count/delete by column, nested transactions).
//! - [`service::PlanService`] is the task record manager. It is the only
//!   writer of task rows and the only writer of change history.

pub mod clock;
pub mod entity;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod transaction;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::sync::atomic::AtomicUsize;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Single-writer: one connection, used by one logical writer at a time.
pub struct PlanDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    tx_depth: AtomicUsize,
}

impl PlanDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite; purge relies on cascades.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let plan_db = Self {
            db,
            conn,
            tx_depth: AtomicUsize::new(0),
        };
        plan_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(plan_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID, e.g. `"tsk-3f8b2c1a..."` (32 hex chars).
    ///
    /// Uses `randomblob(16)` in SQL, so IDs carry 128 random bits and never
    /// depend on a sequence.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT lower(hex(randomblob(16)))", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let hex = row.get::<String>(0)?;
        Ok(format!("{prefix}-{hex}"))
    }
}
