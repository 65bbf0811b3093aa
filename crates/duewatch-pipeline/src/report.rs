//! Aggregated run report.
//!
//! The report is the ordered list of per-record outcomes for one run,
//! in fetch order. There is deliberately no aggregate pass/fail flag:
//! callers (and the plain-text rendering) look at individual lines.

use duewatch_core::types::{DispatchOutcome, RecordOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PipelineReport {
    outcomes: Vec<RecordOutcome>,
}

impl PipelineReport {
    pub fn new(outcomes: Vec<RecordOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn sent_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_sent()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, DispatchOutcome::DispatchFailed { .. }))
            .count()
    }
}

impl std::fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.outcomes.is_empty() {
            return write!(f, "No records to process.");
        }
        let lines: Vec<String> = self.outcomes.iter().map(|o| o.outcome.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}
