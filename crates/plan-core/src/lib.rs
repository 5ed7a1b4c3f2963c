//! # plan-core
//!
//! Core types shared across the planner crates:
//! - Entity structs for tasks, lists, labels and the task change history
//! - The `Priority` and `TaskField` enums
//! - `FieldValue`, the tagged union stored in change history rows
//! - ID prefix constants
//! - Cross-cutting error types
//! - Paginated response envelope

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod value;
