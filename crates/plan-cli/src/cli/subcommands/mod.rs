mod history;
mod list;
mod task;

pub use history::HistoryCommands;
pub use list::ListCommands;
pub use task::{TaskCommands, TaskFilterArgs, TaskUpdateArgs};
