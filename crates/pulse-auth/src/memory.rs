//! In-memory identity backend.
//!
//! Behaves like the managed provider for the flows Pulse exercises, without
//! any network. Used by tests and by offline development; also the
//! substitution point that keeps `AuthClient` testable.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tokio::sync::Mutex;

use crate::backend::{IdentityBackend, ProviderSession};
use crate::error::AuthError;

struct MemoryUser {
    user_id: String,
    password: String,
    disabled: bool,
}

#[derive(Default)]
pub struct MemoryBackend {
    users: Mutex<HashMap<String, MemoryUser>>,
    reset_requests: Mutex<Vec<String>>,
    next_uid: AtomicU64,
    calls: AtomicU64,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of backend calls so far. Lets tests assert that local
    /// validation short-circuits before the backend is reached.
    #[must_use]
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Mark an existing account disabled.
    pub async fn disable(&self, email: &str) {
        if let Some(user) = self.users.lock().await.get_mut(email) {
            user.disabled = true;
        }
    }

    /// Emails that requested a password reset, oldest first.
    pub async fn reset_requests(&self) -> Vec<String> {
        self.reset_requests.lock().await.clone()
    }

    /// Unsigned JWT carrying `sub` and a one-hour `exp`, so expiry checks
    /// behave like they do against real tokens.
    fn mint_token(user_id: &str) -> String {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{user_id}","exp":{exp}}}"#));
        let signature = URL_SAFE_NO_PAD.encode("unsigned");
        format!("{header}.{payload}.{signature}")
    }
}

#[async_trait]
impl IdentityBackend for MemoryBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().await;
        if users.contains_key(email) {
            return Err(AuthError::EmailAlreadyInUse);
        }
        let user_id = format!("mem-{}", self.next_uid.fetch_add(1, Ordering::SeqCst) + 1);
        users.insert(
            email.to_string(),
            MemoryUser {
                user_id: user_id.clone(),
                password: password.to_string(),
                disabled: false,
            },
        );
        Ok(ProviderSession {
            id_token: Self::mint_token(&user_id),
            user_id,
            email: email.to_string(),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().await;
        let Some(user) = users.get(email) else {
            return Err(AuthError::UserNotFound);
        };
        if user.disabled {
            return Err(AuthError::AccountDisabled);
        }
        if user.password != password {
            return Err(AuthError::WrongPassword);
        }
        Ok(ProviderSession {
            user_id: user.user_id.clone(),
            email: email.to_string(),
            id_token: Self::mint_token(&user.user_id),
        })
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.users.lock().await.contains_key(email) {
            return Err(AuthError::UserNotFound);
        }
        self.reset_requests.lock().await.push(email.to_string());
        Ok(())
    }
}
