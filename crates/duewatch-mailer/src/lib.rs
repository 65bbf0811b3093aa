//! # DueWatch Mailer
//!
//! Dispatches one templated notification email per call through an
//! EmailJS-style transactional provider: a single POST carrying the
//! service/template/account identifiers and exactly three template
//! parameters (recipient, formatted due date, message body).
//!
//! A non-2xx response or transport failure is returned as `Err(reason)`
//! for the pipeline to record; it is never fatal to the batch, and no
//! retry is attempted.

use async_trait::async_trait;
use duewatch_core::config::MailerConfig;
use duewatch_core::traits::NotificationSender;
use serde_json::json;

/// HTTP client for the delivery provider, configured at construction.
pub struct EmailJsMailer {
    config: MailerConfig,
    client: reqwest::Client,
}

impl EmailJsMailer {
    pub fn new(config: MailerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    fn send_url(&self) -> String {
        format!(
            "{}/api/v1.0/email/send",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    /// Request payload for one send.
    fn build_payload(&self, recipient: &str, due_display: &str, message: &str) -> serde_json::Value {
        json!({
            "service_id": self.config.service_id,
            "template_id": self.config.template_id,
            "user_id": self.config.user_id,
            "template_params": {
                "notify_email": recipient,
                "due_date": due_display,
                "message": message,
            }
        })
    }
}

#[async_trait]
impl NotificationSender for EmailJsMailer {
    async fn send(
        &self,
        recipient: &str,
        due_display: &str,
        message: &str,
    ) -> Result<(), String> {
        let payload = self.build_payload(recipient, due_display, message);

        let mut request = self.client.post(self.send_url()).json(&payload);
        // Browser-keyed provider accounts reject requests without an
        // Origin header.
        if !self.config.origin.is_empty() {
            request = request.header("origin", self.config.origin.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("Mail send failed: {e}"))?;

        if response.status().is_success() {
            tracing::info!("📤 Email sent to {recipient}");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(format!("Mail provider error {status}: {body}"))
        }
    }
}
