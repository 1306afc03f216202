use crate::cli::GlobalFlags;
use crate::cli::subcommands::task::TaskUpdateArgs;
use crate::commands::shared::{require_owner, resolve_date, resolve_time};
use crate::context::AppContext;
use crate::output::output;

use super::TaskRow;

pub async fn run(
    args: &TaskUpdateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    validate_args(args)?;
    require_owner(ctx)?;

    let current = ctx.service.get_task(&args.id).await?;
    let date = resolve_date(args.date.as_deref())?;

    // Absent flags keep the stored value; an explicit "" clears a time.
    let description = args.description.as_deref().unwrap_or(&current.description);
    let start = match args.start.as_deref() {
        Some(raw) => resolve_time(raw, date)?,
        None => current.start_time.clone(),
    };
    let end = match args.end.as_deref() {
        Some(raw) => resolve_time(raw, date)?,
        None => current.end_time.clone(),
    };

    ctx.service
        .update_task(&args.id, description, &start, &end)
        .await?;
    let updated = ctx.service.get_task(&args.id).await?;
    output(&TaskRow::from(&updated), flags.format)
}

fn validate_args(args: &TaskUpdateArgs) -> anyhow::Result<()> {
    if args.description.is_none() && args.start.is_none() && args.end.is_none() {
        anyhow::bail!("At least one of --description, --start, or --end must be provided");
    }
    Ok(())
}
