//! Error taxonomy.
//!
//! Only one failure mode is fatal to a pipeline run: the record store
//! being unreachable (or a run blowing its deadline, which is surfaced
//! the same way). Everything else that can go wrong with an individual
//! record is data, not an error: it lands in the report as a
//! [`DispatchOutcome`](crate::types::DispatchOutcome).

use thiserror::Error;

/// Errors that can abort a run or fail startup.
#[derive(Debug, Error)]
pub enum DuewatchError {
    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// The record store could not be reached or returned a non-success
    /// status. Fatal to the run; no dispatch is attempted.
    #[error("Record store unavailable: {0}")]
    SourceUnavailable(String),

    /// The HTTP gateway failed to bind or serve.
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DuewatchError>;
