use serde::{Deserialize, Serialize};

/// Authenticated-identity snapshot published by the auth layer.
///
/// Always replaced as one value, never field-by-field. Consumers can never
/// observe a state where `is_authenticated` disagrees with the identity
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub email: Option<String>,
    pub user_id: Option<String>,
}

impl SessionState {
    /// The signed-out state. Also the `Default`.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            email: None,
            user_id: None,
        }
    }

    /// The state for a signed-in user.
    #[must_use]
    pub fn authenticated(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            email: Some(email.into()),
            user_id: Some(user_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_is_anonymous() {
        assert_eq!(SessionState::default(), SessionState::anonymous());
        assert!(!SessionState::default().is_authenticated);
    }

    #[test]
    fn authenticated_fills_every_field() {
        let state = SessionState::authenticated("uid-1", "u@x.com");
        assert!(state.is_authenticated);
        assert_eq!(state.email.as_deref(), Some("u@x.com"));
        assert_eq!(state.user_id.as_deref(), Some("uid-1"));
    }
}
