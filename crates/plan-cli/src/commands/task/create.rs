use plan_core::enums::Priority;
use plan_db::updates::task::NewTask;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_enum, parse_when};
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub name: String,
    pub list: Option<String>,
    pub description: Option<String>,
    pub scheduled: Option<String>,
    pub deadline: Option<String>,
    pub estimate: Option<i64>,
    pub priority: Option<String>,
    pub recurring: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let list_id = match params.list {
        Some(list_id) => list_id,
        None => ctx.service.default_list().await?.id,
    };

    let mut input = NewTask::new(list_id, params.name);
    if let Some(description) = params.description {
        input = input.description(description);
    }
    if let Some(scheduled) = params.scheduled.as_deref() {
        input = input.scheduled_at(parse_when(scheduled, "scheduled")?);
    }
    if let Some(deadline) = params.deadline.as_deref() {
        input = input.deadline_at(parse_when(deadline, "deadline")?);
    }
    if let Some(estimate) = params.estimate {
        input = input.estimate_minutes(estimate);
    }
    if let Some(priority) = params.priority.as_deref() {
        input = input.priority(parse_enum::<Priority>(priority, "priority")?);
    }
    if let Some(recurring) = params.recurring {
        input = input.recurring_rule(recurring);
    }

    let task = ctx.service.create_task(input).await?;
    output(&task, flags.format)
}
