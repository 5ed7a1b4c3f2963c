use clap::Subcommand;

/// Task list commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ListCommands {
    /// Create a list.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// Get a list by ID.
    Get { id: String },
    /// Show every list.
    All,
}
