use plan_core::enums::Priority;
use plan_db::repos::query::TaskFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskFilterArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_enum, parse_opt_when};
use crate::context::AppContext;
use crate::output::output;

/// Plain list, or a page envelope when `--page` or `--limit` is given.
pub async fn run(args: &TaskFilterArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = to_filter(args)?;

    if args.page.is_none() && flags.limit.is_none() {
        let tasks = ctx.service.find_tasks(&filter).await?;
        return output(&tasks, flags.format);
    }

    let page = args.page.unwrap_or(1);
    let limit = effective_limit(flags.limit, ctx.config.general.default_page_size);
    let result = ctx.service.find_tasks_paginated(&filter, page, limit).await?;
    output(&result, flags.format)
}

fn to_filter(args: &TaskFilterArgs) -> anyhow::Result<TaskFilter> {
    let completed = if args.completed {
        Some(true)
    } else if args.open {
        Some(false)
    } else {
        None
    };

    Ok(TaskFilter {
        include_deleted: args.include_deleted,
        deleted_only: args.deleted_only,
        list_id: args.list.clone(),
        date_from: parse_opt_when(args.from.as_deref(), "from")?,
        date_to: parse_opt_when(args.to.as_deref(), "to")?,
        completed,
        priority: args
            .priority
            .as_deref()
            .map(|raw| parse_enum::<Priority>(raw, "priority"))
            .transpose()?,
        overdue: args.overdue,
        search: args.search.clone(),
        label_id: args.label.clone(),
    })
}
