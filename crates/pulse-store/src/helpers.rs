//! Parsing helpers shared by the repository methods.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::StoreError;

/// Parse a stored creation instant.
///
/// Accepts RFC 3339 (what the repository writes) and `SQLite`'s default
/// `yyyy-MM-dd HH:mm:ss` form, read as UTC.
///
/// # Errors
///
/// Returns [`StoreError::InvalidData`] if the string parses as neither.
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::InvalidData(format!("bad timestamp '{raw}': {e}")))
}
