use crate::cli::GlobalFlags;
use crate::cli::subcommands::ListCommands;
use crate::commands::shared::parse::require;
use crate::context::AppContext;
use crate::output::output;

/// Handle `plan list`.
pub async fn handle(action: &ListCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ListCommands::Create { name, color } => {
            let list = ctx.service.create_list(name, color.as_deref()).await?;
            output(&list, flags.format)
        }
        ListCommands::Get { id } => {
            let list = require(ctx.service.get_list(id).await?, "list", id)?;
            output(&list, flags.format)
        }
        ListCommands::All => {
            let lists = ctx.service.all_lists().await?;
            output(&lists, flags.format)
        }
    }
}
