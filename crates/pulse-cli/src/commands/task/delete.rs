use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::require_owner;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct TaskDeletedResponse {
    deleted: bool,
    id: String,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    require_owner(ctx)?;
    ctx.service.delete_task(id).await?;
    output(
        &TaskDeletedResponse {
            deleted: true,
            id: id.to_string(),
        },
        flags.format,
    )
}
