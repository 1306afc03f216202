use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::ResetArgs;
use crate::context;
use crate::output::output;

#[derive(Serialize)]
struct ResetResponse {
    sent: bool,
    email: String,
}

pub async fn handle(
    args: &ResetArgs,
    flags: &GlobalFlags,
    config: &pulse_config::PulseConfig,
) -> anyhow::Result<()> {
    let client = context::build_auth(config);
    client.reset_password(&args.email).await?;
    output(
        &ResetResponse {
            sent: true,
            email: args.email.clone(),
        },
        flags.format,
    )
}
