use clap::Subcommand;

use crate::cli::subcommands::{HistoryCommands, ListCommands, TaskCommands};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Task lists.
    List {
        #[command(subcommand)]
        action: ListCommands,
    },
    /// Tasks: create, update, complete, trash, query.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Per-field change history of tasks.
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
}
