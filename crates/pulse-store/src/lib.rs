//! # pulse-store
//!
//! libSQL task storage for Pulse.
//!
//! Owns the database handle (local file or embedded replica with Turso
//! Cloud sync), the task repository (date-prefixed id allocation, CRUD,
//! cursor pagination) and the in-memory list window the UI layers drive.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29): stable API and
//! Turso Cloud embedded replica support.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod window;

#[cfg(test)]
mod test_support;

use error::StoreError;
use libsql::Builder;

/// Database handle for all Pulse task storage.
///
/// Wraps a libSQL database and a single connection. Opened either as a
/// plain local file or as an embedded replica of a remote database; the
/// repository methods on [`service::TaskService`] do not care which.
pub struct PulseDb {
    db: libsql::Database,
    conn: libsql::Connection,
    synced: bool,
}

impl PulseDb {
    /// Open a local-only database at the given path (`:memory:` for tests).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unknown`] if the database cannot be opened or
    /// migrated.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await.map_err(unknown)?;
        let conn = db.connect().map_err(unknown)?;
        let pulse = Self {
            db,
            conn,
            synced: false,
        };
        pulse.enable_foreign_keys().await?;
        pulse.run_migrations().await?;
        Ok(pulse)
    }

    /// Open an embedded replica of a remote database, pull the current
    /// remote state, then migrate.
    ///
    /// Writes go to the remote and are readable locally right away when
    /// `read_your_writes` is set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unknown`] if the replica cannot be built,
    /// synced or migrated.
    pub async fn open_synced(
        replica_path: &str,
        url: &str,
        token: &str,
        read_your_writes: bool,
    ) -> Result<Self, StoreError> {
        let db = Builder::new_remote_replica(replica_path, url.to_string(), token.to_string())
            .read_your_writes(read_your_writes)
            .build()
            .await
            .map_err(unknown)?;
        db.sync().await.map_err(unknown)?;
        let conn = db.connect().map_err(unknown)?;
        let pulse = Self {
            db,
            conn,
            synced: true,
        };
        pulse.enable_foreign_keys().await?;
        pulse.run_migrations().await?;
        Ok(pulse)
    }

    /// Push and pull frames with the remote. Only valid on a synced handle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unknown`] if replication fails or the handle
    /// is local-only.
    pub async fn sync(&self) -> Result<(), StoreError> {
        let replicated = self.db.sync().await.map_err(unknown)?;
        tracing::debug!(frames = replicated.frames_synced(), "replica synced");
        Ok(())
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle replicates to a remote database.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.synced
    }

    // Foreign keys are per-connection in SQLite.
    async fn enable_foreign_keys(&self) -> Result<(), StoreError> {
        self.conn
            .execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(unknown)?;
        Ok(())
    }
}

fn unknown(e: libsql::Error) -> StoreError {
    StoreError::Unknown(e.to_string())
}
