//! Canonical record and outcome types.
//!
//! A [`NotificationRecord`] is the normalized form of one document from
//! the store; it is immutable for the duration of a pipeline run. The
//! per-record result of a run is a [`DispatchOutcome`], collected in
//! fetch order into the pipeline report.

use serde::{Deserialize, Serialize};

/// A due-date record, normalized from the store's wire encoding.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NotificationRecord {
    /// Opaque identifier from the source store.
    pub id: String,
    /// Recipient address. Required for dispatch.
    pub recipient_email: String,
    /// Free-text body content; may be empty.
    pub message: String,
    /// Due date as fetched (RFC 3339 timestamp or plain date string).
    /// `None` when the document carried no due date at all.
    pub due_date: Option<String>,
    /// Descriptive pass-through fields; never affect eligibility.
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub reference_url: String,
    #[serde(default)]
    pub registered_at: String,
}

impl NotificationRecord {
    /// A record without a recipient or a due date can never be
    /// dispatched; it is reported as incomplete, not dropped.
    pub fn is_complete(&self) -> bool {
        !self.recipient_email.is_empty()
            && self.due_date.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Result of evaluating one due date against the two-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub eligible: bool,
    /// Whole calendar days between now and the due date, in UTC.
    /// 0 = due today, 1 = due tomorrow, negative = overdue.
    pub day_offset: i64,
}

/// Per-record outcome of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DispatchOutcome {
    /// Email handed to the delivery provider (2xx response).
    Sent {
        recipient: String,
        due_display: String,
    },
    /// Due date falls outside the {today, tomorrow} window.
    SkippedNotDue { due_date: String },
    /// Missing recipient or missing/unparseable due date.
    SkippedIncomplete {
        recipient: String,
        due_date: String,
    },
    /// The delivery provider rejected or failed to deliver.
    DispatchFailed {
        recipient: String,
        reason: String,
    },
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent { .. })
    }
}

impl std::fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchOutcome::Sent {
                recipient,
                due_display,
            } => write!(f, "Email sent to \"{recipient}\" (due: {due_display})"),
            DispatchOutcome::SkippedNotDue { due_date } => {
                write!(f, "Not due today or tomorrow: \"{due_date}\"")
            }
            DispatchOutcome::SkippedIncomplete {
                recipient,
                due_date,
            } => write!(
                f,
                "Incomplete record: recipient = \"{recipient}\", due date = \"{due_date}\""
            ),
            DispatchOutcome::DispatchFailed { recipient, reason } => {
                write!(f, "Failed to send to \"{recipient}\": {reason}")
            }
        }
    }
}

/// One report line: which record, and what happened to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordOutcome {
    pub record_id: String,
    pub outcome: DispatchOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness_requires_recipient_and_due_date() {
        let mut rec = NotificationRecord {
            recipient_email: "a@b.com".into(),
            due_date: Some("2025-03-05".into()),
            ..Default::default()
        };
        assert!(rec.is_complete());

        rec.recipient_email.clear();
        assert!(!rec.is_complete());

        rec.recipient_email = "a@b.com".into();
        rec.due_date = None;
        assert!(!rec.is_complete());

        rec.due_date = Some(String::new());
        assert!(!rec.is_complete());
    }

    #[test]
    fn outcome_lines_are_readable() {
        let sent = DispatchOutcome::Sent {
            recipient: "a@b.com".into(),
            due_display: "05 de marzo de 2025".into(),
        };
        assert_eq!(
            sent.to_string(),
            "Email sent to \"a@b.com\" (due: 05 de marzo de 2025)"
        );

        let skipped = DispatchOutcome::SkippedNotDue {
            due_date: "2025-04-01".into(),
        };
        assert!(skipped.to_string().contains("2025-04-01"));
    }
}
