use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::List { action } => commands::list::handle(&action, ctx, flags).await,
        Commands::Task { action } => commands::task::handle(action, ctx, flags).await,
        Commands::History { action } => commands::history::handle(&action, ctx, flags).await,
    }
}
