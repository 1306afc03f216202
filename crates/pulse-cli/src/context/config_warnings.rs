use pulse_config::PulseConfig;

/// Warn when env vars exist for a section that still reads as default,
/// which usually means a mistyped key silently fell through.
pub fn warn_unconfigured(config: &PulseConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &PulseConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.identity.is_configured() && has_env_prefix(&env_keys, "PULSE_IDENTITY") {
        warnings.push(
            "Identity config appears default while PULSE_IDENTITY* env vars exist. Use double underscores (example: PULSE_IDENTITY__API_KEY)."
                .to_string(),
        );
    }

    if !config.database.is_configured() && has_env_prefix(&env_keys, "PULSE_DATABASE") {
        warnings.push(
            "Database config appears default while PULSE_DATABASE* env vars exist. Use double underscores (example: PULSE_DATABASE__URL)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use pulse_config::PulseConfig;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_unconfigured_sections_with_env_prefixes() {
        let config = PulseConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                (
                    "PULSE_IDENTITY__API_KEY".to_string(),
                    "AIzaDemo".to_string(),
                ),
                (
                    "PULSE_DATABASE__URL".to_string(),
                    "libsql://demo".to_string(),
                ),
            ],
        );

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn does_not_warn_when_sections_are_configured() {
        let config = PulseConfig {
            identity: pulse_config::IdentityConfig {
                api_key: "AIzaDemo".to_string(),
                ..Default::default()
            },
            database: pulse_config::DatabaseConfig {
                url: "libsql://demo".to_string(),
                auth_token: "token".to_string(),
                ..Default::default()
            },
        };

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                (
                    "PULSE_IDENTITY__API_KEY".to_string(),
                    "AIzaDemo".to_string(),
                ),
                (
                    "PULSE_DATABASE__URL".to_string(),
                    "libsql://demo".to_string(),
                ),
            ],
        );

        assert!(warnings.is_empty());
    }

    #[test]
    fn stays_quiet_without_matching_env_vars() {
        let config = PulseConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![("PATH".to_string(), "/usr/bin".to_string())],
        );

        assert!(warnings.is_empty());
    }
}
