//! Schema migrations, embedded at compile time and run on open.

use crate::PulseDb;
use crate::error::StoreError;

const MIGRATIONS: &[(&str, &str)] =
    &[("001_initial", include_str!("../migrations/001_initial.sql"))];

impl PulseDb {
    /// Run all embedded migrations in order. Every statement carries
    /// `IF NOT EXISTS`, so re-running on an already-migrated database is a
    /// no-op.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        for (name, sql) in MIGRATIONS {
            self.conn
                .execute_batch(sql)
                .await
                .map_err(|e| StoreError::Unknown(format!("migration {name}: {e}")))?;
        }
        Ok(())
    }
}
