//! REST backend for the managed identity provider.
//!
//! Speaks the identity-toolkit wire protocol: `accounts:signUp`,
//! `accounts:signInWithPassword`, and `accounts:sendOobCode`, with the
//! project API key as a query parameter. Provider error codes are folded
//! into the closed [`AuthError`] taxonomy here so nothing above this layer
//! sees raw wire strings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::{IdentityBackend, ProviderSession};
use crate::error::AuthError;

pub struct RestBackend {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Serialize)]
struct ResetRequest<'a> {
    #[serde(rename = "requestType")]
    request_type: &'a str,
    email: &'a str,
}

#[derive(Deserialize)]
struct SessionResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
    #[serde(rename = "idToken")]
    id_token: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

impl RestBackend {
    #[must_use]
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Full URL for an `accounts:` operation.
    fn url(&self, op: &str) -> String {
        format!(
            "{}/accounts:{op}?key={}",
            self.endpoint.trim_end_matches('/'),
            self.api_key
        )
    }

    async fn post_credentials(
        &self,
        op: &str,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, AuthError> {
        let body = CredentialsRequest {
            email,
            password,
            return_secure_token: true,
        };
        let resp = self
            .http
            .post(self.url(op))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if resp.status().is_success() {
            let session: SessionResponse = resp
                .json()
                .await
                .map_err(|e| AuthError::Unknown(format!("malformed session response: {e}")))?;
            Ok(ProviderSession {
                user_id: session.local_id,
                email: session.email,
                id_token: session.id_token,
            })
        } else {
            Err(read_provider_error(resp).await)
        }
    }
}

#[async_trait]
impl IdentityBackend for RestBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
        self.post_credentials("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
        self.post_credentials("signInWithPassword", email, password)
            .await
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let body = ResetRequest {
            request_type: "PASSWORD_RESET",
            email,
        };
        let resp = self
            .http
            .post(self.url("sendOobCode"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(read_provider_error(resp).await)
        }
    }
}

/// Decode an error response body and map its code.
async fn read_provider_error(resp: reqwest::Response) -> AuthError {
    let status = resp.status();
    match resp.json::<ErrorEnvelope>().await {
        Ok(envelope) => map_provider_code(&envelope.error.message),
        Err(e) => AuthError::Unknown(format!("HTTP {status}: {e}")),
    }
}

/// Map a provider error code onto the closed taxonomy.
///
/// The provider sometimes suffixes codes with detail
/// (`"TOO_MANY_ATTEMPTS_TRY_LATER : ..."`), so only the leading token is
/// matched.
fn map_provider_code(message: &str) -> AuthError {
    let code = message.split([' ', ':']).next().unwrap_or_default();
    match code {
        "EMAIL_EXISTS" => AuthError::EmailAlreadyInUse,
        "EMAIL_NOT_FOUND" => AuthError::UserNotFound,
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => AuthError::WrongPassword,
        "USER_DISABLED" => AuthError::AccountDisabled,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyRequests,
        _ => AuthError::Unknown(message.to_string()),
    }
}
