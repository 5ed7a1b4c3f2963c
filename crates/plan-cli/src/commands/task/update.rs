use plan_core::enums::Priority;
use plan_db::updates::task::TaskUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskUpdateArgs;
use crate::commands::shared::parse::{parse_enum, parse_opt_when, require};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: TaskUpdateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let builder = build_update(&args)?;
    let task = ctx.service.update_task(&args.id, builder.build()).await?;
    output(&require(task, "task", &args.id)?, flags.format)
}

fn build_update(args: &TaskUpdateArgs) -> anyhow::Result<TaskUpdateBuilder> {
    validate_update_args(args)?;

    let mut builder = TaskUpdateBuilder::new();
    if let Some(name) = args.name.as_deref() {
        builder = builder.name(name);
    }
    if args.clear_description {
        builder = builder.description(None);
    } else if let Some(description) = args.description.clone() {
        builder = builder.description(Some(description));
    }
    if args.clear_scheduled {
        builder = builder.scheduled_at(None);
    } else if args.scheduled.is_some() {
        builder = builder.scheduled_at(parse_opt_when(args.scheduled.as_deref(), "scheduled")?);
    }
    if args.clear_deadline {
        builder = builder.deadline_at(None);
    } else if args.deadline.is_some() {
        builder = builder.deadline_at(parse_opt_when(args.deadline.as_deref(), "deadline")?);
    }
    if let Some(estimate) = args.estimate {
        builder = builder.estimate_minutes(Some(estimate));
    }
    if let Some(actual) = args.actual {
        builder = builder.actual_minutes(Some(actual));
    }
    if let Some(priority) = args.priority.as_deref() {
        builder = builder.priority(parse_enum::<Priority>(priority, "priority")?);
    }
    if let Some(recurring) = args.recurring.clone() {
        builder = builder.recurring_rule(Some(recurring));
    }
    Ok(builder)
}

fn validate_update_args(args: &TaskUpdateArgs) -> anyhow::Result<()> {
    if args.name.is_none()
        && args.description.is_none()
        && !args.clear_description
        && args.scheduled.is_none()
        && !args.clear_scheduled
        && args.deadline.is_none()
        && !args.clear_deadline
        && args.estimate.is_none()
        && args.actual.is_none()
        && args.priority.is_none()
        && args.recurring.is_none()
    {
        anyhow::bail!(
            "At least one of --name, --description, --scheduled, --deadline, --estimate, \
             --actual, --priority, --recurring or a --clear-* flag must be provided"
        );
    }
    Ok(())
}
