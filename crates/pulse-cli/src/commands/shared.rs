use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::context::AppContext;

/// Resolve the signed-in account, or fail with a login hint.
pub fn require_owner(ctx: &AppContext) -> anyhow::Result<String> {
    ctx.gate
        .owner_id()
        .ok_or_else(|| anyhow::anyhow!("Not signed in. Run 'pulse auth login' first."))
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid date '{raw}': use YYYY-MM-DD ({error})"))
}

/// Resolve an optional date argument, defaulting to today (UTC).
pub fn resolve_date(raw: Option<&str>) -> anyhow::Result<NaiveDate> {
    raw.map_or_else(|| Ok(Utc::now().date_naive()), parse_date)
}

/// Turn a user-entered time into the stored ISO-8601 form.
///
/// `HH:MM` is interpreted as that clock time (UTC) on `date`. Full RFC 3339
/// strings pass through unchanged. Empty input stays empty, which stores the
/// task without that bound.
pub fn resolve_time(raw: &str, date: NaiveDate) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if let Ok(clock) = NaiveTime::parse_from_str(trimmed, "%H:%M") {
        return Ok(date.and_time(clock).and_utc().to_rfc3339());
    }
    if DateTime::parse_from_rfc3339(trimmed).is_ok() {
        return Ok(trimmed.to_string());
    }
    anyhow::bail!("invalid time '{raw}': use HH:MM or RFC 3339")
}
