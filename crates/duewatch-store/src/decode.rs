//! Wire decoding for the store's document listing.
//!
//! Every field arrives wrapped in a value envelope; a due date may be a
//! `timestampValue` or a plain `stringValue` depending on how the
//! record was written. Both are normalized to the raw string carried on
//! the canonical record. Missing optional fields default to empty and
//! never fail the fetch; the incomplete-record policy is decided later,
//! in the pipeline.

use serde::Deserialize;

use duewatch_core::types::NotificationRecord;

/// Top-level listing response. An absent `documents` array means an
/// empty collection, not an error.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<StoreDocument>,
}

impl ListDocumentsResponse {
    pub(crate) fn into_records(self) -> Vec<NotificationRecord> {
        self.documents.into_iter().map(StoreDocument::into_record).collect()
    }
}

#[derive(Debug, Deserialize, Default)]
struct StoreDocument {
    /// Full resource path; the record id is the last segment.
    #[serde(default)]
    name: String,
    #[serde(default)]
    fields: DocumentFields,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DocumentFields {
    #[serde(default)]
    recipient_email: StoreValue,
    #[serde(default)]
    message: StoreValue,
    #[serde(default)]
    due_date: StoreValue,
    #[serde(default)]
    display_name: StoreValue,
    #[serde(default)]
    reference_url: StoreValue,
    #[serde(default)]
    registered_at: StoreValue,
}

/// One field value envelope. Only the encodings the collection actually
/// uses are modeled; unknown envelope keys are ignored.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct StoreValue {
    #[serde(default)]
    string_value: Option<String>,
    #[serde(default)]
    timestamp_value: Option<String>,
}

impl StoreValue {
    fn text(self) -> String {
        self.string_value
            .or(self.timestamp_value)
            .unwrap_or_default()
    }

    /// Temporal fields: prefer the typed timestamp, fall back to the
    /// string form.
    fn temporal(self) -> Option<String> {
        self.timestamp_value
            .or(self.string_value)
            .filter(|s| !s.is_empty())
    }
}

impl StoreDocument {
    fn into_record(self) -> NotificationRecord {
        let id = self
            .name
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        NotificationRecord {
            id,
            recipient_email: self.fields.recipient_email.text(),
            message: self.fields.message.text(),
            due_date: self.fields.due_date.temporal(),
            display_name: self.fields.display_name.text(),
            reference_url: self.fields.reference_url.text(),
            registered_at: self.fields.registered_at.temporal().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Vec<NotificationRecord> {
        let listing: ListDocumentsResponse = serde_json::from_str(json).unwrap();
        listing.into_records()
    }

    #[test]
    fn decodes_typed_timestamp_due_date() {
        let records = decode(
            r#"{
              "documents": [{
                "name": "projects/p/databases/(default)/documents/notifications/abc123",
                "fields": {
                  "recipientEmail": { "stringValue": "a@b.com" },
                  "message": { "stringValue": "domain renewal" },
                  "dueDate": { "timestampValue": "2025-03-05T00:00:00Z" },
                  "displayName": { "stringValue": "example.com" },
                  "referenceUrl": { "stringValue": "https://example.com" },
                  "registeredAt": { "timestampValue": "2024-03-05T12:00:00Z" }
                }
              }]
            }"#,
        );
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.id, "abc123");
        assert_eq!(rec.recipient_email, "a@b.com");
        assert_eq!(rec.message, "domain renewal");
        assert_eq!(rec.due_date.as_deref(), Some("2025-03-05T00:00:00Z"));
        assert_eq!(rec.display_name, "example.com");
        assert_eq!(rec.registered_at, "2024-03-05T12:00:00Z");
    }

    #[test]
    fn decodes_string_due_date() {
        let records = decode(
            r#"{
              "documents": [{
                "name": "x/notifications/n1",
                "fields": {
                  "recipientEmail": { "stringValue": "a@b.com" },
                  "dueDate": { "stringValue": "2025-03-06" }
                }
              }]
            }"#,
        );
        assert_eq!(records[0].due_date.as_deref(), Some("2025-03-06"));
        // Missing optionals default to empty, never fail the decode.
        assert_eq!(records[0].message, "");
        assert_eq!(records[0].display_name, "");
    }

    #[test]
    fn missing_fields_yield_incomplete_record() {
        let records = decode(
            r#"{
              "documents": [{
                "name": "x/notifications/n2",
                "fields": { "message": { "stringValue": "no contact info" } }
              }]
            }"#,
        );
        assert_eq!(records.len(), 1);
        assert!(records[0].recipient_email.is_empty());
        assert!(records[0].due_date.is_none());
        assert!(!records[0].is_complete());
    }

    #[test]
    fn empty_collection_is_empty_vec() {
        assert!(decode("{}").is_empty());
        assert!(decode(r#"{"documents": []}"#).is_empty());
    }

    #[test]
    fn preserves_document_order() {
        let records = decode(
            r#"{
              "documents": [
                { "name": "c/n1", "fields": {} },
                { "name": "c/n2", "fields": {} },
                { "name": "c/n3", "fields": {} }
              ]
            }"#,
        );
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n2", "n3"]);
    }
}
