//! # DueWatch Pipeline
//!
//! One pipeline run: fetch every record, decide per-record eligibility
//! against the {today, tomorrow} UTC window, format and dispatch the
//! eligible ones, and aggregate every outcome into an ordered report.
//!
//! Failure isolation is the contract here: a bad record or a rejected
//! send affects only its own report line. The single fatal failure mode
//! is the store being unavailable, in which case nothing is dispatched.

mod report;

pub use report::PipelineReport;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use duewatch_core::error::{DuewatchError, Result};
use duewatch_core::traits::{NotificationSender, RecordSource};
use duewatch_core::types::{DispatchOutcome, NotificationRecord, RecordOutcome};
use duewatch_core::{format, window};

/// Orchestrates one fetch → evaluate → dispatch → aggregate cycle.
pub struct NotificationPipeline {
    source: Arc<dyn RecordSource>,
    sender: Arc<dyn NotificationSender>,
}

impl NotificationPipeline {
    pub fn new(source: Arc<dyn RecordSource>, sender: Arc<dyn NotificationSender>) -> Self {
        Self { source, sender }
    }

    /// Run the pipeline against the current wall clock.
    pub async fn run(&self) -> Result<PipelineReport> {
        self.run_at(Utc::now()).await
    }

    /// Run with a hard deadline; exceeding it aborts the whole run.
    pub async fn run_with_deadline(&self, deadline: Duration) -> Result<PipelineReport> {
        match tokio::time::timeout(deadline, self.run()).await {
            Ok(result) => result,
            Err(_) => Err(DuewatchError::SourceUnavailable(format!(
                "Run deadline exceeded after {}s",
                deadline.as_secs()
            ))),
        }
    }

    /// Run with an explicit "now", so tests control the window.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<PipelineReport> {
        let records = self.source.fetch().await?;
        if records.is_empty() {
            tracing::info!("📭 No records to process");
            return Ok(PipelineReport::default());
        }

        let mut outcomes = Vec::with_capacity(records.len());
        for record in &records {
            let outcome = self.process_record(now, record).await;
            outcomes.push(RecordOutcome {
                record_id: record.id.clone(),
                outcome,
            });
        }

        let report = PipelineReport::new(outcomes);
        tracing::info!(
            "🧾 Run complete: {} record(s), {} sent, {} failed",
            report.len(),
            report.sent_count(),
            report.failed_count()
        );
        Ok(report)
    }

    /// Decide and execute the outcome for a single record. Never
    /// returns an error: every failure mode here is report data.
    async fn process_record(
        &self,
        now: DateTime<Utc>,
        record: &NotificationRecord,
    ) -> DispatchOutcome {
        let raw_due = record.due_date.clone().unwrap_or_default();

        if !record.is_complete() {
            return DispatchOutcome::SkippedIncomplete {
                recipient: record.recipient_email.clone(),
                due_date: raw_due,
            };
        }

        // A due date that does not parse is an incomplete record, not
        // an error: the batch keeps going.
        let Some(due) = window::parse_due_date(&raw_due) else {
            return DispatchOutcome::SkippedIncomplete {
                recipient: record.recipient_email.clone(),
                due_date: raw_due,
            };
        };

        let eligibility = window::evaluate(now, due);
        if !eligibility.eligible {
            return DispatchOutcome::SkippedNotDue { due_date: raw_due };
        }

        let due_display = format::format_due_date(&raw_due);
        match self
            .sender
            .send(&record.recipient_email, &due_display, &record.message)
            .await
        {
            Ok(()) => DispatchOutcome::Sent {
                recipient: record.recipient_email.clone(),
                due_display,
            },
            Err(reason) => {
                tracing::warn!(
                    "⚠️ Dispatch failed for record '{}': {reason}",
                    record.id
                );
                DispatchOutcome::DispatchFailed {
                    recipient: record.recipient_email.clone(),
                    reason,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct FakeSource {
        records: Vec<NotificationRecord>,
        unavailable: bool,
    }

    #[async_trait]
    impl RecordSource for FakeSource {
        async fn fetch(&self) -> Result<Vec<NotificationRecord>> {
            if self.unavailable {
                return Err(DuewatchError::SourceUnavailable(
                    "Store returned 503 Service Unavailable".into(),
                ));
            }
            Ok(self.records.clone())
        }
    }

    /// Records every send; fails for recipients in `reject`.
    #[derive(Default)]
    struct RecordingSender {
        calls: Mutex<Vec<(String, String, String)>>,
        reject: Vec<String>,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl NotificationSender for RecordingSender {
        async fn send(
            &self,
            recipient: &str,
            due_display: &str,
            message: &str,
        ) -> std::result::Result<(), String> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.calls.lock().unwrap().push((
                recipient.to_string(),
                due_display.to_string(),
                message.to_string(),
            ));
            if self.reject.iter().any(|r| r == recipient) {
                Err(format!("Mail provider error 422: bad address {recipient}"))
            } else {
                Ok(())
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 5, 10, 0, 0).unwrap()
    }

    fn record(id: &str, email: &str, due: Option<&str>) -> NotificationRecord {
        NotificationRecord {
            id: id.into(),
            recipient_email: email.into(),
            message: format!("reminder for {id}"),
            due_date: due.map(String::from),
            ..Default::default()
        }
    }

    fn pipeline(
        records: Vec<NotificationRecord>,
        sender: RecordingSender,
    ) -> (NotificationPipeline, Arc<RecordingSender>) {
        let sender = Arc::new(sender);
        let pipeline = NotificationPipeline::new(
            Arc::new(FakeSource {
                records,
                unavailable: false,
            }),
            sender.clone(),
        );
        (pipeline, sender)
    }

    #[tokio::test]
    async fn sends_for_today_and_tomorrow_only() {
        let (pipeline, sender) = pipeline(
            vec![
                record("n1", "today@x.com", Some("2025-03-05T23:00:00Z")),
                record("n2", "tomorrow@x.com", Some("2025-03-06")),
                record("n3", "later@x.com", Some("2025-03-08")),
                record("n4", "overdue@x.com", Some("2025-03-01")),
            ],
            RecordingSender::default(),
        );

        let report = pipeline.run_at(now()).await.unwrap();
        assert_eq!(report.len(), 4);
        assert!(report.outcomes()[0].outcome.is_sent());
        assert!(report.outcomes()[1].outcome.is_sent());
        assert!(matches!(
            report.outcomes()[2].outcome,
            DispatchOutcome::SkippedNotDue { .. }
        ));
        assert!(matches!(
            report.outcomes()[3].outcome,
            DispatchOutcome::SkippedNotDue { .. }
        ));

        let calls = sender.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "today@x.com");
        assert_eq!(calls[1].1, "06 de marzo de 2025");
    }

    #[tokio::test]
    async fn incomplete_record_never_reaches_the_sender() {
        let (pipeline, sender) = pipeline(
            vec![
                record("n1", "", Some("2025-03-05")),
                record("n2", "a@b.com", None),
                record("n3", "b@c.com", Some("not a date")),
            ],
            RecordingSender::default(),
        );

        let report = pipeline.run_at(now()).await.unwrap();
        for line in report.outcomes() {
            assert!(
                matches!(line.outcome, DispatchOutcome::SkippedIncomplete { .. }),
                "unexpected outcome: {:?}",
                line.outcome
            );
        }
        assert!(sender.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn one_rejected_send_does_not_disturb_the_rest() {
        let (pipeline, sender) = pipeline(
            vec![
                record("n1", "ok1@x.com", Some("2025-03-05")),
                record("n2", "bad@x.com", Some("2025-03-05")),
                record("n3", "ok2@x.com", Some("2025-03-06")),
            ],
            RecordingSender {
                reject: vec!["bad@x.com".into()],
                ..Default::default()
            },
        );

        let report = pipeline.run_at(now()).await.unwrap();
        assert_eq!(report.len(), 3);
        assert!(report.outcomes()[0].outcome.is_sent());
        assert!(matches!(
            &report.outcomes()[1].outcome,
            DispatchOutcome::DispatchFailed { recipient, reason }
                if recipient == "bad@x.com" && reason.contains("422")
        ));
        assert!(report.outcomes()[2].outcome.is_sent());

        // All three were attempted, in fetch order.
        let calls = sender.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1].0, "bad@x.com");
    }

    #[tokio::test]
    async fn report_preserves_fetch_order() {
        let (pipeline, _) = pipeline(
            vec![
                record("z", "z@x.com", Some("2025-03-05")),
                record("a", "", None),
                record("m", "m@x.com", Some("2099-01-01")),
            ],
            RecordingSender::default(),
        );

        let report = pipeline.run_at(now()).await.unwrap();
        let ids: Vec<_> = report
            .outcomes()
            .iter()
            .map(|o| o.record_id.as_str())
            .collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[tokio::test]
    async fn empty_fetch_is_an_empty_report() {
        let (pipeline, sender) = pipeline(vec![], RecordingSender::default());
        let report = pipeline.run_at(now()).await.unwrap();
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "No records to process.");
        assert!(sender.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn source_unavailable_aborts_before_any_dispatch() {
        let sender = Arc::new(RecordingSender::default());
        let pipeline = NotificationPipeline::new(
            Arc::new(FakeSource {
                records: vec![record("n1", "a@b.com", Some("2025-03-05"))],
                unavailable: true,
            }),
            sender.clone(),
        );

        let err = pipeline.run_at(now()).await.unwrap_err();
        assert!(matches!(err, DuewatchError::SourceUnavailable(_)));
        assert!(sender.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deadline_expiry_fails_the_run() {
        let (pipeline, _) = pipeline(
            vec![record("n1", "slow@x.com", Some("2025-03-05"))],
            RecordingSender {
                delay: Some(Duration::from_secs(5)),
                ..Default::default()
            },
        );

        let err = pipeline
            .run_with_deadline(Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, DuewatchError::SourceUnavailable(_)));
        assert!(err.to_string().contains("deadline"));
    }

    #[tokio::test]
    async fn report_renders_one_line_per_record() {
        let (pipeline, _) = pipeline(
            vec![
                record("n1", "a@x.com", Some("2025-03-05")),
                record("n2", "b@x.com", Some("2025-04-01")),
                record("n3", "", None),
            ],
            RecordingSender::default(),
        );

        let report = pipeline.run_at(now()).await.unwrap();
        let rendered = report.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("a@x.com"));
        assert!(lines[0].contains("05 de marzo de 2025"));
        assert!(lines[1].contains("2025-04-01"));
        assert!(lines[2].contains("Incomplete record"));
    }

    #[tokio::test]
    async fn due_date_check_uses_calendar_days_not_elapsed_time() {
        // 23:59 now, due at midnight: one calendar day, eligible.
        let (pipeline, _) = pipeline(
            vec![record("n1", "edge@x.com", Some("2025-03-06T00:00:00Z"))],
            RecordingSender::default(),
        );
        let late = Utc.with_ymd_and_hms(2025, 3, 5, 23, 59, 0).unwrap();
        let report = pipeline.run_at(late).await.unwrap();
        assert!(report.outcomes()[0].outcome.is_sent());
    }
}
