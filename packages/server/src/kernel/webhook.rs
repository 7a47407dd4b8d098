//! Outbound automation webhook (Make.com or any JSON receiver).
//!
//! One POST per call. No retries, no idempotency key: whatever the receiver
//! answers is reported back to the caller as-is.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use super::BaseWebhook;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("the webhook is not configured")]
    NotConfigured,

    #[error("webhook request failed: {0}")]
    Network(String),
}

/// reqwest-backed webhook sender.
#[derive(Clone)]
pub struct HttpWebhook {
    http_client: Client,
    url: Option<String>,
}

impl HttpWebhook {
    pub fn new(url: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            url: url.filter(|u| !u.trim().is_empty()),
        }
    }
}

#[async_trait]
impl BaseWebhook for HttpWebhook {
    fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    async fn send(&self, body: &serde_json::Value) -> Result<u16, WebhookError> {
        let url = self.url.as_deref().ok_or(WebhookError::NotConfigured)?;

        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Webhook request failed");
                WebhookError::Network(e.to_string())
            })?;

        let status = response.status().as_u16();
        debug!(status, "Webhook responded");

        Ok(status)
    }
}

/// Any 2xx counts as delivered.
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}
