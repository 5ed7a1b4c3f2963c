//! Input types for task mutations.
//!
//! `TaskUpdate` carries one `Option` per field: `None` leaves the field alone.
//! Nullable columns use `Option<Option<T>>`, so "clear this field"
//! (`Some(None)`) stays distinct from "not supplied" (`None`).

pub mod task;
