use chrono::Utc;
use serde::Serialize;

use pulse_auth::{expiry, token_store};

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    email: Option<String>,
    user_id: Option<String>,
    expires_at: Option<String>,
    session_source: Option<String>,
    note: Option<String>,
}

pub async fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = match token_store::load() {
        Some(stored) => match expiry::decode_expiry(&stored.id_token) {
            Ok(expires) if expires <= Utc::now() => AuthStatusResponse {
                authenticated: false,
                email: Some(stored.email),
                user_id: Some(stored.user_id),
                expires_at: Some(expires.to_rfc3339()),
                session_source: token_store::detect_session_source(),
                note: Some("stored session has expired; run 'pulse auth login'".into()),
            },
            // Undecodable tokens are kept; the provider is the judge of those.
            expires => AuthStatusResponse {
                authenticated: true,
                email: Some(stored.email),
                user_id: Some(stored.user_id),
                expires_at: expires.ok().map(|dt| dt.to_rfc3339()),
                session_source: token_store::detect_session_source(),
                note: None,
            },
        },
        None => AuthStatusResponse {
            authenticated: false,
            email: None,
            user_id: None,
            expires_at: None,
            session_source: None,
            note: Some("no stored session".into()),
        },
    };

    output(&status, flags.format)
}
