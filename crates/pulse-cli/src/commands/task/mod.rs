mod add;
mod delete;
mod list;
mod update;

use serde::Serialize;

use pulse_core::entities::Task;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

/// Handle `pulse task <subcommand>`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::Add(args) => add::run(args, ctx, flags).await,
        TaskCommands::List(args) => list::run(args, ctx, flags).await,
        TaskCommands::Update(args) => update::run(args, ctx, flags).await,
        TaskCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}

/// Task as the CLI prints it.
#[derive(Serialize)]
struct TaskRow {
    id: String,
    date: String,
    time: String,
    description: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            date: task.date_text().unwrap_or_else(|| "-".into()),
            time: task.time_range_text().unwrap_or_else(|| "-".into()),
            description: task.description.clone(),
        }
    }
}
