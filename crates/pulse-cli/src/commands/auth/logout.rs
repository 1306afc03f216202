use serde::Serialize;

use pulse_auth::token_store;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct LogoutResponse {
    cleared: bool,
}

pub async fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    token_store::delete()?;
    output(&LogoutResponse { cleared: true }, flags.format)
}
