use clap::Subcommand;

/// Change history commands.
#[derive(Clone, Debug, Subcommand)]
pub enum HistoryCommands {
    /// All changes of one task, newest first.
    Task { id: String },
    /// Changes of one field of one task, newest first.
    Field { id: String, field: String },
    /// Most recent changes across all tasks (`--limit`, default 20).
    Recent,
    /// Changes inside an inclusive time window.
    Range {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// The latest change of one field.
    Last { id: String, field: String },
    /// Number of changes per field for one task.
    Summary { id: String },
    /// Delete history older than N days (defaults to the configured retention).
    Prune {
        #[arg(long)]
        days: Option<u32>,
    },
}
