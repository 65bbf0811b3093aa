//! # DueWatch Core
//!
//! Shared foundation for the DueWatch worker: configuration, the error
//! taxonomy, canonical record types, the seams the pipeline is built
//! around (`RecordSource`, `NotificationSender`), and the pure
//! calendar-window / date-display logic.
//!
//! Everything here is I/O free. The REST store client and the email
//! provider client live in their own crates and implement the traits
//! defined in [`traits`].

pub mod config;
pub mod error;
pub mod format;
pub mod traits;
pub mod types;
pub mod window;

pub use config::DuewatchConfig;
pub use error::{DuewatchError, Result};
pub use types::{DispatchOutcome, Eligibility, NotificationRecord, RecordOutcome};
