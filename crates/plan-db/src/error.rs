//! Database error types for plan-db.

use plan_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
///
/// Absence is not an error: lookups return `Ok(None)` for unknown IDs.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Input rejected before any storage call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The storage engine failed. Any open transaction has been rolled back.
    #[error("Storage unavailable: {0}")]
    Storage(#[from] libsql::Error),

    /// A row could not be decoded (bad data in the DB).
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// An internal consistency rule was broken. Not reachable through the
    /// public API.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether retrying the same call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::InvalidValue { field, reason } => {
                Self::Query(format!("invalid {field}: {reason}"))
            }
            CoreError::NotFound { .. } => Self::NoResult,
            CoreError::Other(e) => Self::Other(e),
        }
    }
}
