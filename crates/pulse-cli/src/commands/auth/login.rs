use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::CredentialArgs;
use crate::context;
use crate::output::output;

pub async fn handle(
    args: &CredentialArgs,
    flags: &GlobalFlags,
    config: &pulse_config::PulseConfig,
) -> anyhow::Result<()> {
    let client = context::build_auth(config);
    let session = client.sign_in(&args.email, &args.password).await?;
    let response = super::persist_session(&session)?;
    output(&response, flags.format)
}
