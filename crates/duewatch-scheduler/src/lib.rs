//! # DueWatch Scheduler
//!
//! Recurring trigger for the notification pipeline. The cadence is
//! operator-configured: a 5-field cron expression (minute/hour
//! granularity) or a plain interval in seconds. Each firing is one
//! independent pipeline run; a failed run is logged and the loop keeps
//! going. Overlap with an on-demand HTTP run is allowed since runs
//! share no mutable state.

pub mod cron;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use duewatch_core::config::SchedulerConfig;
use duewatch_pipeline::NotificationPipeline;

/// How the trigger recurs.
#[derive(Debug, Clone, PartialEq)]
pub enum Cadence {
    /// Fixed interval between runs.
    Interval(Duration),
    /// Cron expression evaluated in UTC.
    Cron(String),
}

impl Cadence {
    /// Pick the cadence from config: a non-empty cron expression wins,
    /// otherwise the fixed interval.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        if config.cron.trim().is_empty() {
            Cadence::Interval(Duration::from_secs(config.every_secs.max(1)))
        } else {
            Cadence::Cron(config.cron.trim().to_string())
        }
    }
}

/// Run the scheduled trigger loop forever. Callers `tokio::spawn` this
/// next to the gateway.
pub async fn run_scheduler(pipeline: Arc<NotificationPipeline>, config: SchedulerConfig) {
    let cadence = Cadence::from_config(&config);
    let run_deadline = Duration::from_secs(config.run_timeout_secs.max(1));
    tracing::info!("⏰ Scheduler started ({cadence:?})");

    match cadence {
        Cadence::Interval(every) => {
            let mut interval = tokio::time::interval(every);
            // The first tick fires immediately; skip it so "every N
            // seconds" means N seconds from startup.
            interval.tick().await;
            loop {
                interval.tick().await;
                fire(&pipeline, run_deadline).await;
            }
        }
        Cadence::Cron(expression) => loop {
            let Some(next) = cron::next_fire(&expression, Utc::now()) else {
                tracing::error!("Scheduler stopped: unusable cron expression '{expression}'");
                return;
            };
            let wait = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            tracing::debug!("Next scheduled run at {next}");
            tokio::time::sleep(wait).await;
            fire(&pipeline, run_deadline).await;
        },
    }
}

/// One scheduled firing: run the pipeline and log the report.
async fn fire(pipeline: &NotificationPipeline, deadline: Duration) {
    tracing::info!("🔔 Scheduled run triggered");
    match pipeline.run_with_deadline(deadline).await {
        Ok(report) => {
            for line in report.to_string().lines() {
                tracing::info!("📣 {line}");
            }
        }
        Err(e) => tracing::error!("Scheduled run failed: {e}"),
    }
}
