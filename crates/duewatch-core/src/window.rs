//! Calendar-day window evaluation.
//!
//! Eligibility is decided on calendar days, not elapsed time: both
//! instants are truncated to their UTC date before differencing, so a
//! due date later the same day (or one minute into tomorrow) never
//! produces a fractional-day false negative.

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::Eligibility;

/// Parse a due-date string as fetched from the store.
///
/// Accepts RFC 3339 timestamps (the store's native timestamp encoding)
/// and plain `YYYY-MM-DD` dates (the string encoding some records use).
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Evaluate a due date against the {today, tomorrow} window.
pub fn evaluate(now: DateTime<Utc>, due: DateTime<Utc>) -> Eligibility {
    let day_offset = due
        .date_naive()
        .signed_duration_since(now.date_naive())
        .num_days();
    Eligibility {
        eligible: day_offset == 0 || day_offset == 1,
        day_offset,
    }
}
