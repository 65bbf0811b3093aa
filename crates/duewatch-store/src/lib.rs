//! # DueWatch Store
//!
//! Read-only record source backed by a Firestore-style REST API.
//! One GET against the collection's documents endpoint per pipeline
//! run; the response is decoded from the store's value-envelope wire
//! shape into canonical [`NotificationRecord`]s.
//!
//! Anything that prevents a full, well-formed fetch (transport error,
//! non-2xx status, malformed body) is `SourceUnavailable`: the run
//! aborts rather than dispatching against a partial snapshot.

mod decode;

use async_trait::async_trait;
use duewatch_core::config::StoreConfig;
use duewatch_core::error::{DuewatchError, Result};
use duewatch_core::traits::RecordSource;
use duewatch_core::types::NotificationRecord;

use crate::decode::ListDocumentsResponse;

/// REST client for the document store, configured at construction.
pub struct RestRecordSource {
    config: StoreConfig,
    client: reqwest::Client,
}

impl RestRecordSource {
    pub fn new(config: StoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Documents endpoint for the configured collection.
    fn query_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.project_id,
            self.config.collection,
            self.config.api_key
        )
    }
}

#[async_trait]
impl RecordSource for RestRecordSource {
    async fn fetch(&self) -> Result<Vec<NotificationRecord>> {
        let url = self.query_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DuewatchError::SourceUnavailable(format!("Store request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DuewatchError::SourceUnavailable(format!(
                "Store returned {status}: {body}"
            )));
        }

        let listing: ListDocumentsResponse = response.json().await.map_err(|e| {
            DuewatchError::SourceUnavailable(format!("Malformed store response: {e}"))
        })?;

        let records = listing.into_records();
        tracing::debug!("📥 Fetched {} record(s) from store", records.len());
        Ok(records)
    }
}
