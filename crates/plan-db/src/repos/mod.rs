//! Repository modules. Each adds methods to `PlanService` via `impl PlanService`.

pub mod history;
pub mod label;
pub mod list;
pub mod query;
pub mod relations;
pub mod task;
pub mod trash;
