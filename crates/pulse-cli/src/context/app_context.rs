use std::path::Path;

use anyhow::Context;

use pulse_auth::{AuthClient, MemoryBackend, RestBackend, SessionGate, token_store};
use pulse_config::PulseConfig;
use pulse_store::service::TaskService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: TaskService,
    pub auth: AuthClient,
    pub gate: SessionGate,
    pub config: PulseConfig,
}

impl AppContext {
    /// Initialize all shared resources.
    ///
    /// Restores the stored session, if any, before opening the database so
    /// command handlers observe the final auth state.
    pub async fn init(config: PulseConfig) -> anyhow::Result<Self> {
        let auth = build_auth(&config);
        let gate = auth.subscribe();

        if let Some(stored) = token_store::load() {
            if auth.restore_session(&stored) {
                tracing::debug!(email = %stored.email, "restored stored session");
            } else {
                tracing::warn!("stored session has expired; run 'pulse auth login'");
            }
        }

        let service = open_service(&config).await?;

        Ok(Self {
            service,
            auth,
            gate,
            config,
        })
    }
}

/// Build the auth client for the configured identity provider.
///
/// Without an API key the in-memory backend stands in, which keeps every
/// auth command working offline. Accounts on that backend last only for
/// the process lifetime.
pub fn build_auth(config: &PulseConfig) -> AuthClient {
    if config.identity.is_configured() {
        AuthClient::new(Box::new(RestBackend::new(
            config.identity.api_key.clone(),
            config.identity.endpoint.clone(),
        )))
    } else {
        tracing::warn!(
            "identity provider not configured (PULSE_IDENTITY__API_KEY); using the in-memory auth backend"
        );
        AuthClient::new(Box::new(MemoryBackend::new()))
    }
}

/// Open task storage, preferring an embedded replica when remote database
/// credentials are configured.
async fn open_service(config: &PulseConfig) -> anyhow::Result<TaskService> {
    let db = &config.database;
    let local_path = db.local_db_path();
    let local_path_str = local_path.to_string_lossy();

    if !db.is_configured() {
        ensure_parent_dir(&local_path)?;
        return TaskService::new_local(&local_path_str)
            .await
            .context("failed to open local task database");
    }

    let replica_path = db.replica_path();
    ensure_parent_dir(&replica_path)?;
    let replica_path_str = replica_path.to_string_lossy();

    match TaskService::new_synced(
        &replica_path_str,
        &db.url,
        &db.auth_token,
        db.read_your_writes,
    )
    .await
    {
        Ok(service) => Ok(service),
        Err(error) => {
            tracing::warn!(%error, "failed to open synced task database; falling back to local");
            ensure_parent_dir(&local_path)?;
            TaskService::new_local(&local_path_str)
                .await
                .context("failed to open local task database")
        }
    }
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}
