use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time;

/// A time-boxed work item owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Date-prefixed identifier (`YYYYMMDDnnn`). Also the document key and
    /// the descending sort key (newest first). Immutable once assigned.
    pub id: String,
    /// Owner key (email address). Every query and mutation is scoped by it.
    pub user_id: String,
    pub description: String,
    /// Creation instant, set once and never mutated.
    pub created_at: DateTime<Utc>,
    /// ISO-8601 datetime string, or empty when the task has no time range.
    pub start_time: String,
    /// ISO-8601 datetime string, or empty when the task has no time range.
    pub end_time: String,
}

impl Task {
    /// Both time fields are set.
    #[must_use]
    pub fn has_time_range(&self) -> bool {
        !self.start_time.is_empty() && !self.end_time.is_empty()
    }

    /// `"09:00 - 10:00"` style display text, or `None` without a time range.
    ///
    /// A field that fails to parse is shown as the raw stored string.
    #[must_use]
    pub fn time_range_text(&self) -> Option<String> {
        if !self.has_time_range() {
            return None;
        }
        let start = time::clock_text(&self.start_time).unwrap_or_else(|| self.start_time.clone());
        let end = time::clock_text(&self.end_time).unwrap_or_else(|| self.end_time.clone());
        Some(format!("{start} - {end}"))
    }

    /// A task is valid when its trimmed description is non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Calendar date (`yyyy-MM-dd`) of `start_time`, or `None` without one.
    #[must_use]
    pub fn date_text(&self) -> Option<String> {
        time::parse_flexible(&self.start_time).map(|dt| time::date_key(dt.date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Task {
        Task {
            id: "20260209001".to_string(),
            user_id: "u@x.com".to_string(),
            description: "Morning review".to_string(),
            created_at: Utc::now(),
            start_time: "2026-02-09T09:00:00Z".to_string(),
            end_time: "2026-02-09T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn time_range_requires_both_fields() {
        let mut task = sample();
        assert!(task.has_time_range());
        task.end_time.clear();
        assert!(!task.has_time_range());
        task.end_time = "2026-02-09T10:00:00Z".to_string();
        task.start_time.clear();
        assert!(!task.has_time_range());
    }

    #[test]
    fn time_range_text_renders_clock_times() {
        let task = sample();
        assert_eq!(task.time_range_text(), Some("09:00 - 10:00".to_string()));
    }

    #[test]
    fn time_range_text_none_without_range() {
        let mut task = sample();
        task.start_time.clear();
        task.end_time.clear();
        assert_eq!(task.time_range_text(), None);
    }

    #[test]
    fn time_range_text_falls_back_to_raw_string() {
        let mut task = sample();
        task.end_time = "later".to_string();
        assert_eq!(task.time_range_text(), Some("09:00 - later".to_string()));
    }

    #[test]
    fn validity_ignores_surrounding_whitespace() {
        let mut task = sample();
        assert!(task.is_valid());
        task.description = "   \n\t".to_string();
        assert!(!task.is_valid());
    }

    #[test]
    fn date_text_uses_start_time() {
        let task = sample();
        assert_eq!(task.date_text(), Some("2026-02-09".to_string()));

        let mut untimed = sample();
        untimed.start_time.clear();
        assert_eq!(untimed.date_text(), None);
    }

    #[test]
    fn serde_roundtrip_preserves_all_fields() {
        let task = sample();
        let json = serde_json::to_string(&task).unwrap();
        let recovered: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, task);
    }
}
