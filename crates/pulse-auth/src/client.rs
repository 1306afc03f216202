//! The auth client: local validation, backend delegation, state publication.

use pulse_core::entities::SessionState;
use tokio::sync::watch;

use crate::backend::{IdentityBackend, ProviderSession};
use crate::error::AuthError;
use crate::expiry;
use crate::session::SessionGate;
use crate::token_store::StoredSession;

const MIN_PASSWORD_LEN: usize = 6;

/// Authentication client over an injected [`IdentityBackend`].
///
/// Owns the write side of the session channel. Every identity change
/// (sign-in, sign-up, restore, sign-out) publishes one whole
/// [`SessionState`] value; subscribers never observe partial updates.
pub struct AuthClient {
    backend: Box<dyn IdentityBackend>,
    sessions: watch::Sender<SessionState>,
}

impl AuthClient {
    #[must_use]
    pub fn new(backend: Box<dyn IdentityBackend>) -> Self {
        let (sessions, _) = watch::channel(SessionState::anonymous());
        Self { backend, sessions }
    }

    /// Subscribe to session-state changes. May be called any number of
    /// times; each gate observes the same channel.
    #[must_use]
    pub fn subscribe(&self) -> SessionGate {
        SessionGate::new(self.sessions.subscribe())
    }

    /// Create a new account and sign in as it.
    ///
    /// Local validation runs first and short-circuits before the backend is
    /// contacted. On success the authenticated state is published and the
    /// provider session returned so the caller can persist credentials.
    ///
    /// # Errors
    ///
    /// Returns the validation variants (`EmptyFields`, `InvalidEmail`,
    /// `PasswordTooShort`) or a provider-mapped `AuthError`.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
        validate_credentials(email, password)?;
        let session = self.backend.sign_up(email, password).await?;
        self.publish(&session);
        Ok(session)
    }

    /// Sign in with existing credentials.
    ///
    /// # Errors
    ///
    /// Returns the validation variants or a provider-mapped `AuthError`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
        validate_credentials(email, password)?;
        let session = self.backend.sign_in(email, password).await?;
        self.publish(&session);
        Ok(session)
    }

    /// Sign out. Purely local: the provider has no sign-out call, so this
    /// only replaces the published state with the anonymous one.
    pub fn sign_out(&self) {
        self.sessions.send_replace(SessionState::anonymous());
    }

    /// Ask the provider to send a password-reset email. No state change.
    ///
    /// # Errors
    ///
    /// Returns `EmptyFields`/`InvalidEmail` from local validation, or a
    /// provider-mapped `AuthError`.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        validate_email(email)?;
        self.backend.send_password_reset(email).await
    }

    /// Adopt a persisted session at startup.
    ///
    /// The token's `exp` claim is checked when it can be decoded; a token
    /// already past it is rejected and the state stays anonymous. An opaque
    /// token is adopted as-is, the first remote call will reject it if the
    /// provider disagrees. Returns whether the session was adopted.
    pub fn restore_session(&self, stored: &StoredSession) -> bool {
        if let Ok(expires_at) = expiry::decode_expiry(&stored.id_token)
            && expires_at <= chrono::Utc::now()
        {
            tracing::debug!(email = %stored.email, "stored session expired; staying anonymous");
            return false;
        }
        self.sessions.send_replace(SessionState::authenticated(
            stored.user_id.clone(),
            stored.email.clone(),
        ));
        true
    }

    fn publish(&self, session: &ProviderSession) {
        self.sessions.send_replace(SessionState::authenticated(
            session.user_id.clone(),
            session.email.clone(),
        ));
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::EmptyFields);
    }
    if !is_valid_email(email) {
        return Err(AuthError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::EmptyFields);
    }
    if !is_valid_email(email) {
        return Err(AuthError::InvalidEmail);
    }
    Ok(())
}

/// Structural email check: `local@domain.tld` with a 2+ letter final label.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::memory::MemoryBackend;

    use super::*;

    fn client_with_memory() -> (AuthClient, std::sync::Arc<MemoryBackend>) {
        let backend = std::sync::Arc::new(MemoryBackend::new());
        let client = AuthClient::new(Box::new(SharedBackend(backend.clone())));
        (client, backend)
    }

    /// Lets tests keep a handle on the backend the client owns.
    struct SharedBackend(std::sync::Arc<MemoryBackend>);

    #[async_trait::async_trait]
    impl crate::backend::IdentityBackend for SharedBackend {
        async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
            self.0.sign_up(email, password).await
        }
        async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
            self.0.sign_in(email, password).await
        }
        async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
            self.0.send_password_reset(email).await
        }
    }

    #[rstest]
    #[case("u@x.com", true)]
    #[case("first.last@sub.domain.org", true)]
    #[case("u+tag@x.co", true)]
    #[case("", false)]
    #[case("no-at-sign", false)]
    #[case("@x.com", false)]
    #[case("u@", false)]
    #[case("u@nodot", false)]
    #[case("u@x.c", false)]
    #[case("u@x.c0m", false)]
    #[case("u u@x.com", false)]
    fn email_shape_check(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(is_valid_email(email), valid, "{email:?}");
    }

    #[tokio::test]
    async fn empty_fields_short_circuit_before_backend() {
        let (client, backend) = client_with_memory();
        let err = client.sign_in("", "").await.unwrap_err();
        assert!(matches!(err, AuthError::EmptyFields));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn invalid_email_short_circuits_before_backend() {
        let (client, backend) = client_with_memory();
        let err = client.sign_up("not-an-email", "secret1").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn short_password_short_circuits_before_backend() {
        let (client, backend) = client_with_memory();
        let err = client.sign_up("u@x.com", "12345").await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordTooShort));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn sign_in_publishes_whole_authenticated_state() {
        let (client, _backend) = client_with_memory();
        let gate = client.subscribe();
        assert!(!gate.is_authenticated());

        client.sign_up("u@x.com", "secret1").await.unwrap();
        let state = gate.state();
        assert!(state.is_authenticated);
        assert_eq!(state.email.as_deref(), Some("u@x.com"));
        assert!(state.user_id.is_some());
        assert_eq!(gate.owner_id().as_deref(), Some("u@x.com"));
    }

    #[tokio::test]
    async fn sign_out_returns_to_anonymous() {
        let (client, _backend) = client_with_memory();
        let gate = client.subscribe();
        client.sign_up("u@x.com", "secret1").await.unwrap();
        assert!(gate.is_authenticated());

        client.sign_out();
        assert_eq!(gate.state(), SessionState::anonymous());
        assert_eq!(gate.owner_id(), None);
    }

    #[tokio::test]
    async fn failed_sign_in_leaves_state_untouched() {
        let (client, _backend) = client_with_memory();
        let gate = client.subscribe();
        let err = client.sign_in("ghost@x.com", "secret1").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn state_changes_arrive_in_order() {
        let (client, _backend) = client_with_memory();
        let mut gate = client.subscribe();

        client.sign_up("u@x.com", "secret1").await.unwrap();
        gate.changed().await.unwrap();
        assert!(gate.is_authenticated());

        client.sign_out();
        gate.changed().await.unwrap();
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn restore_adopts_fresh_session() {
        let (client, _backend) = client_with_memory();
        let gate = client.subscribe();
        let session = client.sign_up("u@x.com", "secret1").await.unwrap();
        client.sign_out();

        let stored = StoredSession {
            user_id: session.user_id.clone(),
            email: session.email.clone(),
            id_token: session.id_token,
        };
        assert!(client.restore_session(&stored));
        assert!(gate.is_authenticated());
        assert_eq!(gate.owner_id().as_deref(), Some("u@x.com"));
    }

    #[tokio::test]
    async fn restore_rejects_expired_token() {
        use base64::Engine as _;
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let (client, _backend) = client_with_memory();
        let gate = client.subscribe();

        let exp = chrono::Utc::now().timestamp() - 60;
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"uid","exp":{exp}}}"#));
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let stale = StoredSession {
            user_id: "uid".into(),
            email: "u@x.com".into(),
            id_token: format!("{header}.{payload}.sig"),
        };

        assert!(!client.restore_session(&stale));
        assert!(!gate.is_authenticated());
    }
}
