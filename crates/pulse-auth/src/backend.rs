//! Identity backend abstraction.
//!
//! The client validates credentials locally, then delegates to one of these
//! backends. Production uses [`crate::RestBackend`] against the managed
//! identity API; tests and offline runs use [`crate::MemoryBackend`].

use async_trait::async_trait;

use crate::error::AuthError;

/// Session material returned by the provider on a successful sign-in or
/// sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    /// Provider-assigned user id (`localId` on the wire).
    pub user_id: String,
    /// Canonical email as the provider stores it.
    pub email: String,
    /// Short-lived identity token.
    pub id_token: String,
}

/// Operations the identity provider exposes to the client.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Create a new account from already-validated credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailAlreadyInUse` for a duplicate registration,
    /// or another provider-mapped variant.
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError>;

    /// Exchange already-validated credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound`, `AuthError::WrongPassword`,
    /// `AuthError::AccountDisabled`, or another provider-mapped variant.
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError>;

    /// Ask the provider to send its password-reset email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` when no account matches, or another
    /// provider-mapped variant.
    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;
}
