mod create;
mod list;
mod update;

use plan_core::entities::Task;
use plan_db::service::PlanService;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::commands::shared::parse::require;
use crate::context::AppContext;
use crate::output::output;

/// Handle `plan task`.
pub async fn handle(action: TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        TaskCommands::Create {
            name,
            list,
            description,
            scheduled,
            deadline,
            estimate,
            priority,
            recurring,
        } => {
            let params = create::Params {
                name,
                list,
                description,
                scheduled,
                deadline,
                estimate,
                priority,
                recurring,
            };
            create::run(params, ctx, flags).await
        }
        TaskCommands::Get { id } => {
            let task = require(svc.get_task(&id).await?, "task", &id)?;
            output(&task, flags.format)
        }
        TaskCommands::Show { id } => {
            let full = require(svc.find_task_with_relations(&id).await?, "task", &id)?;
            output(&full, flags.format)
        }
        TaskCommands::Update(args) => update::run(args, ctx, flags).await,
        TaskCommands::Complete { id } => show_task(svc.mark_complete(&id).await?, &id, flags),
        TaskCommands::Reopen { id } => show_task(svc.mark_incomplete(&id).await?, &id, flags),
        TaskCommands::Move { id, list } => {
            show_task(svc.move_to_list(&id, &list).await?, &id, flags)
        }
        TaskCommands::Delete { id } => show_task(svc.soft_delete_task(&id).await?, &id, flags),
        TaskCommands::Restore { id } => show_task(svc.restore_task(&id).await?, &id, flags),
        TaskCommands::Purge { id } => {
            if !svc.purge_task(&id).await? {
                anyhow::bail!("task '{id}' is not in the trash");
            }
            output(&serde_json::json!({ "purged": id }), flags.format)
        }
        TaskCommands::PurgeAll => {
            let removed = svc.purge_all_deleted().await?;
            output(&serde_json::json!({ "purged": removed }), flags.format)
        }
        TaskCommands::PurgeOlder { days } => {
            let removed = purge_older(svc, days).await?;
            output(&serde_json::json!({ "purged": removed }), flags.format)
        }
        TaskCommands::List(args) => list::run(&args, ctx, flags).await,
        TaskCommands::Trash { list } => {
            let tasks = match list.as_deref() {
                Some(list_id) => svc.find_deleted_by_list(list_id).await?,
                None => svc.find_deleted().await?,
            };
            output(&tasks, flags.format)
        }
    }
}

fn show_task(task: Option<Task>, id: &str, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&require(task, "task", id)?, flags.format)
}

async fn purge_older(svc: &PlanService, days: u32) -> anyhow::Result<u64> {
    let cutoff = svc.now() - chrono::Duration::days(i64::from(days));
    Ok(svc.purge_deleted_older_than(cutoff).await?)
}
