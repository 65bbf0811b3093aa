//! Lightweight cron expression parser.
//! Supports: "MIN HOUR DOM MON DOW" (5-field, no seconds)
//! Wildcards: *, */N, N, comma lists. Day-of-month/month/day-of-week
//! accept only "*" (the worker cadence is minute/hour granularity).
//! Example: "0 8 * * *" = every day at 8:00 UTC.

use chrono::{DateTime, Duration, Timelike, Utc};

/// Compute the next firing time after `after`, or `None` for an
/// expression this parser does not accept.
pub fn next_fire(expression: &str, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = expression.split_whitespace().collect();
    if parts.len() != 5 {
        tracing::warn!(
            "Invalid cron expression: '{}' (need 5 fields: MIN HOUR DOM MON DOW)",
            expression
        );
        return None;
    }

    let minutes = parse_field(parts[0], 0, 59)?;
    let hours = parse_field(parts[1], 0, 23)?;
    // Remaining fields are fixed to "*" at this granularity.
    for field in &parts[2..] {
        if *field != "*" {
            tracing::warn!("Unsupported cron field '{}' (only '*' accepted)", field);
            return None;
        }
    }

    // Walk forward minute by minute, at most 48 hours.
    let mut candidate = after + Duration::minutes(1);
    candidate = candidate.with_second(0).unwrap_or(candidate);
    for _ in 0..(48 * 60) {
        if minutes.contains(&candidate.minute()) && hours.contains(&candidate.hour()) {
            return Some(candidate);
        }
        candidate += Duration::minutes(1);
    }
    None
}

/// Expand one cron field into its matching values.
fn parse_field(field: &str, min: u32, max: u32) -> Option<Vec<u32>> {
    if field == "*" {
        return Some((min..=max).collect());
    }

    if let Some(step) = field.strip_prefix("*/") {
        let n: u32 = step.parse().ok()?;
        if n == 0 {
            return None;
        }
        return Some((min..=max).step_by(n as usize).collect());
    }

    if field.contains(',') {
        let vals: Result<Vec<u32>, _> = field.split(',').map(|s| s.trim().parse()).collect();
        return vals
            .ok()
            .map(|v| v.into_iter().filter(|x| *x >= min && *x <= max).collect());
    }

    let n: u32 = field.parse().ok()?;
    (n >= min && n <= max).then(|| vec![n])
}
