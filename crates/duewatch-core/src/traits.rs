//! Seams between the pipeline and the outside world.
//!
//! Both traits exist so the pipeline can be exercised against in-memory
//! fakes; the real implementations live in `duewatch-store` and
//! `duewatch-mailer`.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::NotificationRecord;

/// Fetches the current set of notification records from the store.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every record in the collection, in store order.
    ///
    /// An empty collection is `Ok(vec![])`. Transport failures and
    /// non-2xx responses are `DuewatchError::SourceUnavailable`, which
    /// aborts the whole run.
    async fn fetch(&self) -> Result<Vec<NotificationRecord>>;
}

/// Delivers one notification email.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Hand one message to the delivery provider.
    ///
    /// `Err` carries the provider's response body or the transport
    /// error message; the pipeline records it as a per-record failure
    /// and keeps going. At most one attempt per record per run.
    async fn send(
        &self,
        recipient: &str,
        due_display: &str,
        message: &str,
    ) -> std::result::Result<(), String>;
}
