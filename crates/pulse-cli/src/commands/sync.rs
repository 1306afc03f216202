use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SyncResponse {
    mode: &'static str,
    synced: bool,
}

/// Handle `pulse sync`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let synced = ctx.service.is_synced_replica();
    ctx.service.sync().await?;
    output(
        &SyncResponse {
            mode: if synced { "synced" } else { "local" },
            synced,
        },
        flags.format,
    )
}
