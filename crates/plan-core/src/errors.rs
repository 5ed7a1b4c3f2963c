//! Cross-cutting error types.
//!
//! Storage errors (`DatabaseError`) live in `plan-db`; the CLI converges
//! everything into `anyhow::Error`.

use thiserror::Error;

/// Errors that can be raised by any planner crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation before reaching storage.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A stored value could not be decoded into its typed form.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
