//! Task-time parsing and formatting.
//!
//! Task times are stored as strings. New writes are ISO-8601, but stored data
//! also carries two historical shapes: timezone-less ISO
//! (`"2026-02-09T09:00:00"`) and bare clock times (`"09:00"`) from the
//! earliest app versions. Readers accept all three; a bare clock time means
//! "that time on the current date".

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parse a stored task-time string.
///
/// Tries RFC 3339 first, then timezone-less ISO (assumed UTC), then the
/// legacy `HH:mm` clock form interpreted on the current UTC date. Empty or
/// unrecognizable input yields `None`.
#[must_use]
pub fn parse_flexible(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .ok()
        .map(|t| Utc::now().date_naive().and_time(t).and_utc())
}

/// 8-digit `yyyyMMdd` task-id prefix for a calendar date.
#[must_use]
pub fn day_prefix(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// `yyyy-MM-dd` rendering of a calendar date, the form the date filter
/// matches against stored `start_time` strings.
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `HH:mm` display text (UTC) for a stored task time, `None` when the
/// string does not parse.
#[must_use]
pub fn clock_text(s: &str) -> Option<String> {
    parse_flexible(s).map(|dt| dt.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2026-02-09T09:00:00Z", "2026-02-09 09:00")]
    #[case("2026-02-09T09:00:00+02:00", "2026-02-09 07:00")]
    #[case("2026-02-09T09:00:00", "2026-02-09 09:00")]
    fn iso_forms_parse(#[case] input: &str, #[case] expected: &str) {
        let parsed = parse_flexible(input).unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), expected);
    }

    #[test]
    fn legacy_clock_time_lands_on_current_date() {
        let parsed = parse_flexible("09:30").unwrap();
        assert_eq!(parsed.date_naive(), Utc::now().date_naive());
        assert_eq!(parsed.format("%H:%M").to_string(), "09:30");
    }

    #[rstest]
    #[case("")]
    #[case("not a time")]
    #[case("25:99")]
    fn unrecognizable_input_yields_none(#[case] input: &str) {
        assert_eq!(parse_flexible(input), None);
    }

    #[test]
    fn day_prefix_is_eight_digits() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();
        assert_eq!(day_prefix(date), "20260209");
        assert_eq!(day_prefix(date).len(), 8);
    }

    #[test]
    fn date_key_matches_filter_format() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();
        assert_eq!(date_key(date), "2026-02-09");
    }

    #[test]
    fn clock_text_renders_utc_clock() {
        assert_eq!(clock_text("2026-02-09T09:00:00Z"), Some("09:00".to_string()));
        assert_eq!(clock_text("garbage"), None);
    }
}
