//! Error type for configuration loading.

use thiserror::Error;

/// Raised when the layered configuration cannot be assembled.
///
/// Wraps the underlying figment extraction or merge failure; the source
/// chain names the offending file or env var.
#[derive(Debug, Error)]
#[error("Configuration error: {0}")]
pub struct ConfigError(#[from] figment::Error);
