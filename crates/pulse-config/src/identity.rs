//! Identity provider configuration.

use serde::{Deserialize, Serialize};

/// Default REST endpoint of the managed identity provider.
fn default_endpoint() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Project API key, appended to every identity request as `?key=`.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the identity REST API. Override for emulators or proxies.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
        }
    }
}

impl IdentityConfig {
    /// Check if the identity config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = IdentityConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.endpoint, "https://identitytoolkit.googleapis.com/v1");
    }

    #[test]
    fn configured_when_api_key_set() {
        let config = IdentityConfig {
            api_key: "AIza-test".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
