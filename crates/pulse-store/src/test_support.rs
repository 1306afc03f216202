//! Shared test utilities for pulse-store tests.

#[cfg(test)]
pub(crate) mod helpers {
    use crate::PulseDb;
    use crate::service::TaskService;

    /// Create an in-memory `TaskService` (local-only, no sync).
    pub async fn test_service() -> TaskService {
        let db = PulseDb::open_local(":memory:").await.unwrap();
        TaskService::from_db(db)
    }
}
