use crate::cli::GlobalFlags;
use crate::cli::subcommands::task::TaskAddArgs;
use crate::commands::shared::{require_owner, resolve_date, resolve_time};
use crate::context::AppContext;
use crate::output::output;

use super::TaskRow;

pub async fn run(args: &TaskAddArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let owner = require_owner(ctx)?;
    let date = resolve_date(args.date.as_deref())?;
    let start = resolve_time(&args.start, date)?;
    let end = resolve_time(&args.end, date)?;

    let task = ctx
        .service
        .create_task(&args.description, &start, &end, &owner)
        .await?;
    output(&TaskRow::from(&task), flags.format)
}
