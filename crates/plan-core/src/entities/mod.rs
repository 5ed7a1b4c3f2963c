//! Entity structs for the planner domain.
//!
//! Each entity maps to a table in the libSQL database (see
//! `plan-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`.

mod attachment;
mod change;
mod label;
mod list;
mod reminder;
mod subtask;
mod task;

pub use attachment::Attachment;
pub use change::{ChangeRecord, FieldChangeCount};
pub use label::Label;
pub use list::TaskList;
pub use reminder::Reminder;
pub use subtask::Subtask;
pub use task::{Task, TaskWithRelations};
