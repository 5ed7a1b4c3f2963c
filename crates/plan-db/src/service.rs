//! Service layer orchestrating task mutations with change history.
//!
//! `PlanService` wraps `PlanDb` (raw database access) and a [`Clock`]. All repo
//! methods are implemented as `impl PlanService` blocks under `repos/`.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::PlanDb;
use crate::clock::{Clock, SystemClock};
use crate::error::DatabaseError;
use crate::helpers::truncate_millis;

/// Task record manager.
///
/// Every task mutation follows this protocol:
/// 1. Load the current row and stage one change per field that differs
/// 2. Begin transaction
/// 3. UPDATE the changed columns and `updated_at`
/// 4. Append one history row per staged change
/// 5. Commit
///
/// A patch that changes nothing skips steps 2-5 entirely.
pub struct PlanService {
    db: PlanDb,
    clock: Arc<dyn Clock>,
}

impl PlanService {
    /// Open a local database with the system clock.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = PlanDb::open_local(db_path).await?;
        Ok(Self::from_db(db, Arc::new(SystemClock)))
    }

    /// Create from an existing `PlanDb` and clock.
    #[must_use]
    pub fn from_db(db: PlanDb, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &PlanDb {
        &self.db
    }

    /// Current time at storage precision.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        truncate_millis(self.clock.now())
    }
}
