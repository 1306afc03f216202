use pulse_store::window::TaskWindow;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::task::TaskListArgs;
use crate::commands::shared::{parse_date, require_owner};
use crate::context::AppContext;
use crate::output::output;

use super::TaskRow;

pub async fn run(args: &TaskListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let owner = require_owner(ctx)?;

    let mut window = TaskWindow::new();
    if let Some(raw) = args.date.as_deref() {
        window.set_filter(parse_date(raw)?);
    }

    loop {
        let token = window.token();
        let page = ctx.service.load_tasks(&owner, window.cursor()).await?;
        window.apply_page(token, page);
        if window.is_exhausted() || !args.all {
            break;
        }
    }

    if !window.is_exhausted() {
        tracing::warn!("more tasks exist; pass --all to load every page");
    }

    let rows: Vec<TaskRow> = window.visible().iter().map(TaskRow::from).collect();
    output(&rows, flags.format)
}
