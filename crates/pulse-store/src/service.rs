//! High-level service facade over the task database.

use crate::PulseDb;
use crate::error::StoreError;

/// The main storage handle. Owns the database; the repository methods in
/// [`crate::repos`] hang off this type.
pub struct TaskService {
    db: PulseDb,
}

impl TaskService {
    /// Open a local-only service at `db_path` (`:memory:` for tests).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unknown`] if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, StoreError> {
        Ok(Self {
            db: PulseDb::open_local(db_path).await?,
        })
    }

    /// Open a service backed by an embedded replica of a remote database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unknown`] if the replica cannot be built or
    /// synced.
    pub async fn new_synced(
        replica_path: &str,
        url: &str,
        token: &str,
        read_your_writes: bool,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            db: PulseDb::open_synced(replica_path, url, token, read_your_writes).await?,
        })
    }

    /// Wrap an already-opened database.
    #[must_use]
    pub const fn from_db(db: PulseDb) -> Self {
        Self { db }
    }

    /// Get a reference to the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &PulseDb {
        &self.db
    }

    /// Whether writes replicate to a remote database.
    #[must_use]
    pub const fn is_synced_replica(&self) -> bool {
        self.db.is_synced()
    }

    /// Sync with the remote if this is a replica; no-op for local-only.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unknown`] if replication fails.
    pub async fn sync(&self) -> Result<(), StoreError> {
        if !self.db.is_synced() {
            tracing::debug!("local-only database, skipping sync");
            return Ok(());
        }
        self.db.sync().await
    }
}
