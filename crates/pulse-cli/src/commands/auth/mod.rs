mod login;
mod logout;
mod reset;
mod signup;
mod status;

use serde::Serialize;

use pulse_auth::{ProviderSession, StoredSession, expiry, token_store};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `pulse auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &pulse_config::PulseConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Signup(args) => signup::handle(args, flags, config).await,
        AuthCommands::Login(args) => login::handle(args, flags, config).await,
        AuthCommands::Logout => logout::handle(flags).await,
        AuthCommands::Reset(args) => reset::handle(args, flags, config).await,
        AuthCommands::Status => status::handle(flags).await,
    }
}

/// Response shape shared by signup and login.
#[derive(Serialize)]
struct SessionResponse {
    authenticated: bool,
    email: String,
    user_id: String,
    expires_at: Option<String>,
}

/// Persist a fresh provider session and describe it for output.
fn persist_session(session: &ProviderSession) -> anyhow::Result<SessionResponse> {
    token_store::store(&StoredSession {
        user_id: session.user_id.clone(),
        email: session.email.clone(),
        id_token: session.id_token.clone(),
    })?;

    Ok(SessionResponse {
        authenticated: true,
        email: session.email.clone(),
        user_id: session.user_id.clone(),
        expires_at: expiry::decode_expiry(&session.id_token)
            .ok()
            .map(|expires| expires.to_rfc3339()),
    })
}
