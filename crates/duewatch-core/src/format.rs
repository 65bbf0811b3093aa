//! Due-date display formatting.
//!
//! The notification template shows dates in Spanish, long month form:
//! "05 de marzo de 2025". Input that does not parse is passed through
//! unchanged so the report still shows whatever the store held.

use chrono::Datelike;

use crate::window::parse_due_date;

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Render a raw due-date string for display.
pub fn format_due_date(raw: &str) -> String {
    match parse_due_date(raw) {
        Some(dt) => {
            let month = MONTHS_ES[dt.month0() as usize];
            format!("{:02} de {} de {}", dt.day(), month, dt.year())
        }
        None => raw.to_string(),
    }
}
