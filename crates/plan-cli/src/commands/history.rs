use anyhow::Context;
use chrono::Duration;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HistoryCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_field, parse_when, require};
use crate::context::AppContext;
use crate::output::output;

/// Handle `plan history`.
pub async fn handle(
    action: &HistoryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        HistoryCommands::Task { id } => output(&svc.history_for_task(id).await?, flags.format),
        HistoryCommands::Field { id, field } => {
            let field = parse_field(field)?;
            output(&svc.history_for_field(id, field).await?, flags.format)
        }
        HistoryCommands::Recent => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_page_size);
            output(&svc.recent_changes(limit).await?, flags.format)
        }
        HistoryCommands::Range { from, to } => {
            let from = parse_when(from, "from")?;
            let to = parse_when(to, "to")?;
            if from > to {
                anyhow::bail!("--from must not be after --to");
            }
            output(&svc.changes_between(from, to).await?, flags.format)
        }
        HistoryCommands::Last { id, field } => {
            let parsed = parse_field(field)?;
            let change = require(
                svc.last_change(id, parsed).await?,
                "change",
                &format!("{id}/{field}"),
            )?;
            output(&change, flags.format)
        }
        HistoryCommands::Summary { id } => output(&svc.change_summary(id).await?, flags.format),
        HistoryCommands::Prune { days } => {
            let days = days.unwrap_or(ctx.config.general.history_retention_days);
            let cutoff = svc.now() - Duration::days(i64::from(days));
            let removed = svc
                .prune_history_older_than(cutoff)
                .await
                .context("failed to prune history")?;
            output(
                &serde_json::json!({ "pruned": removed, "cutoff": cutoff }),
                flags.format,
            )
        }
    }
}
