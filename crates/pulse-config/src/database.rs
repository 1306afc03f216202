//! Turso/libSQL database configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default read-your-writes setting for the embedded replica.
const fn default_read_your_writes() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Remote database URL (e.g., `libsql://mydb.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Database auth token.
    #[serde(default)]
    pub auth_token: String,

    /// Local replica file for embedded-replica mode. Empty means the
    /// default under the user data directory.
    #[serde(default)]
    pub local_replica_path: String,

    /// Plain local database file used when no remote is configured.
    /// Empty means the default under the user data directory.
    #[serde(default)]
    pub db_path: String,

    /// Whether the embedded replica reads its own writes.
    #[serde(default = "default_read_your_writes")]
    pub read_your_writes: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            local_replica_path: String::new(),
            db_path: String::new(),
            read_your_writes: default_read_your_writes(),
        }
    }
}

impl DatabaseConfig {
    /// Check if the config has the minimum required fields for remote access.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Replica file path for embedded-replica mode.
    #[must_use]
    pub fn replica_path(&self) -> PathBuf {
        if self.local_replica_path.is_empty() {
            Self::data_dir().join("replica.db")
        } else {
            PathBuf::from(&self.local_replica_path)
        }
    }

    /// Database file path for plain local mode.
    #[must_use]
    pub fn local_db_path(&self) -> PathBuf {
        if self.db_path.is_empty() {
            Self::data_dir().join("pulse.db")
        } else {
            PathBuf::from(&self.db_path)
        }
    }

    /// User data directory for database files. Falls back to the current
    /// directory when the platform reports no data dir.
    fn data_dir() -> PathBuf {
        dirs::data_dir().map_or_else(|| PathBuf::from("."), |p| p.join("pulse"))
    }
}
