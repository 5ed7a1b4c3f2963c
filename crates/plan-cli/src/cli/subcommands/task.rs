use clap::{Args, Subcommand};

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task.
    Create {
        #[arg(long)]
        name: String,
        /// Owning list (defaults to the Inbox list).
        #[arg(long)]
        list: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Planned day, RFC 3339 or YYYY-MM-DD.
        #[arg(long)]
        scheduled: Option<String>,
        /// Hard deadline, RFC 3339 or YYYY-MM-DD.
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        estimate: Option<i64>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        recurring: Option<String>,
    },
    /// Get a task by ID.
    Get { id: String },
    /// Show a task with its list, subtasks, labels, reminders and attachments.
    Show { id: String },
    /// Update fields of a task. Only changed fields are recorded.
    Update(TaskUpdateArgs),
    /// Mark a task completed.
    Complete { id: String },
    /// Mark a completed task as open again.
    Reopen { id: String },
    /// Move a task to another list.
    Move {
        id: String,
        #[arg(long)]
        list: String,
    },
    /// Move a task to the trash.
    Delete { id: String },
    /// Bring a task back from the trash.
    Restore { id: String },
    /// Permanently remove one trashed task.
    Purge { id: String },
    /// Permanently remove every trashed task.
    PurgeAll,
    /// Permanently remove tasks trashed more than N days ago.
    PurgeOlder {
        #[arg(long)]
        days: u32,
    },
    /// Query tasks.
    List(TaskFilterArgs),
    /// Show trashed tasks, most recently deleted first.
    Trash {
        #[arg(long)]
        list: Option<String>,
    },
}

#[derive(Clone, Debug, Args)]
pub struct TaskUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long, conflicts_with = "clear_scheduled")]
    pub scheduled: Option<String>,
    #[arg(long)]
    pub clear_scheduled: bool,
    #[arg(long, conflicts_with = "clear_deadline")]
    pub deadline: Option<String>,
    #[arg(long)]
    pub clear_deadline: bool,
    #[arg(long)]
    pub estimate: Option<i64>,
    #[arg(long)]
    pub actual: Option<i64>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub recurring: Option<String>,
}

#[derive(Clone, Debug, Default, Args)]
pub struct TaskFilterArgs {
    #[arg(long)]
    pub list: Option<String>,
    /// Inclusive lower bound on the scheduled date.
    #[arg(long)]
    pub from: Option<String>,
    /// Inclusive upper bound on the scheduled date.
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long, conflicts_with = "open")]
    pub completed: bool,
    #[arg(long)]
    pub open: bool,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub overdue: bool,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long)]
    pub include_deleted: bool,
    #[arg(long)]
    pub deleted_only: bool,
    /// 1-indexed page; when set, the result is a page envelope sized by
    /// `--limit`.
    #[arg(long)]
    pub page: Option<u32>,
}
