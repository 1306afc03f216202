//! Persisted session storage.
//!
//! Lets a new process restore the signed-in identity without re-prompting.
//! Storage tiers: OS keyring, `PULSE_AUTH__SESSION` env var, then a
//! `~/.pulse/credentials` file (0600, directory 0700 on unix).

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "pulse-cli";
const KEYRING_USER: &str = "session";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Serialized session, stored as one JSON blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    pub user_id: String,
    pub email: String,
    pub id_token: String,
}

/// Returns the keyring service name.
///
/// Defaults to `"pulse-cli"`. Override via `PULSE_KEYRING_SERVICE` env var
/// for testing (e.g., `"pulse-cli-test"`) to avoid touching production
/// credentials.
fn keyring_service() -> String {
    std::env::var("PULSE_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store a session in the OS keychain. Falls back to file if keyring
/// unavailable.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if both keyring and file storage fail.
pub fn store(session: &StoredSession) -> Result<(), AuthError> {
    let payload = serde_json::to_string(session)
        .map_err(|e| AuthError::TokenStore(format!("serialize session: {e}")))?;
    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(&payload) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(&payload)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(&payload)
        }
    }
}

/// Load a stored session. Priority: keyring, then `PULSE_AUTH__SESSION`
/// env, then `~/.pulse/credentials`.
#[must_use]
pub fn load() -> Option<StoredSession> {
    // 1. Keyring
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && let Ok(raw) = entry.get_password()
        && !raw.is_empty()
    {
        return parse_session(&raw);
    }

    // 2. Environment variable
    if let Ok(raw) = std::env::var("PULSE_AUTH__SESSION") {
        if !raw.is_empty() {
            return parse_session(&raw);
        }
    }

    // 3. File fallback
    load_file().as_deref().and_then(parse_session)
}

/// Delete stored credentials from keyring and file.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the credentials file cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    // Delete from keyring (ignore errors, the entry may not exist)
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }

    // Delete credentials file
    let path = credentials_path()?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            AuthError::TokenStore(format!("failed to delete {}: {e}", path.display()))
        })?;
    }

    Ok(())
}

/// Detect which tier the current session came from (for status display).
#[must_use]
pub fn detect_session_source() -> Option<String> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && entry.get_password().is_ok_and(|t| !t.is_empty())
    {
        return Some("keyring".into());
    }
    if std::env::var("PULSE_AUTH__SESSION").is_ok_and(|t| !t.is_empty()) {
        return Some("env".into());
    }
    if load_file().is_some() {
        return Some("file".into());
    }
    None
}

// --- Private file helpers ---

fn parse_session(raw: &str) -> Option<StoredSession> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(error) => {
            tracing::warn!(%error, "stored session is not valid JSON; ignoring");
            None
        }
    }
}

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".pulse").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStore("home directory not found, cannot store credentials".into())
        })
}

fn store_file(payload: &str) -> Result<(), AuthError> {
    let path = credentials_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(&path, payload)
        .map_err(|e| AuthError::TokenStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file() -> Option<String> {
    let path = credentials_path().ok()?;
    fs::read_to_string(&path)
        .ok()
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> StoredSession {
        StoredSession {
            user_id: "uid-1".into(),
            email: "u@x.com".into(),
            id_token: "header.payload.sig".into(),
        }
    }

    #[test]
    fn credentials_path_is_under_home() {
        let path = credentials_path().expect("should resolve");
        assert!(path.ends_with(".pulse/credentials"));
    }

    #[test]
    fn session_json_roundtrip() {
        let payload = serde_json::to_string(&sample()).expect("serialize");
        let recovered = parse_session(&payload).expect("parse");
        assert_eq!(recovered, sample());
    }

    #[test]
    fn malformed_session_json_is_ignored() {
        assert!(parse_session("{not json").is_none());
        assert!(parse_session(r#"{"email":"u@x.com"}"#).is_none());
    }

    #[test]
    fn file_store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let creds_path = tmp.path().join("credentials");
        let payload = serde_json::to_string(&sample()).expect("serialize");

        // Store
        std::fs::write(&creds_path, &payload).expect("write");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&creds_path, std::fs::Permissions::from_mode(0o600))
                .expect("chmod");
        }

        // Load
        let content = std::fs::read_to_string(&creds_path).expect("read");
        assert_eq!(parse_session(&content), Some(sample()));

        // Verify permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&creds_path)
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }

        // Delete
        std::fs::remove_file(&creds_path).expect("delete");
        assert!(!creds_path.exists());
    }

    #[test]
    fn load_file_ignores_empty_content() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let creds_path = tmp.path().join("credentials");

        std::fs::write(&creds_path, "   \n  ").expect("write");
        let content = std::fs::read_to_string(&creds_path)
            .ok()
            .filter(|s| !s.trim().is_empty());
        assert!(content.is_none(), "whitespace-only should return None");
    }
}
