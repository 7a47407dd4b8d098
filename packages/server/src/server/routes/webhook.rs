//! Webhook utility endpoints.

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::kernel::WebhookError;
use crate::server::app::AxumAppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookStatusResponse {
    pub has_webhook: bool,
}

/// Whether a webhook URL is configured. Never echoes the URL.
pub async fn webhook_status_handler(
    Extension(state): Extension<AxumAppState>,
) -> Json<WebhookStatusResponse> {
    Json(WebhookStatusResponse {
        has_webhook: state.deps.webhook.is_configured(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForwardResponse {
    pub ok: bool,
    pub sent_to_make: bool,
    pub status_from_make: u16,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForwardError {
    pub error: String,
}

/// Forward an arbitrary JSON body to the webhook, once.
///
/// The receiver's status is reported whatever it is; only a missing URL or
/// a transport failure is an error here. An unreadable body is reported in
/// the same `{error}` shape.
pub async fn make_webhook_handler(
    Extension(state): Extension<AxumAppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ForwardResponse>, (StatusCode, Json<ForwardError>)> {
    let Json(body) = body.map_err(|rejection| {
        let error = format!("Invalid JSON body: {}", rejection.body_text());
        warn!(error = %error, "Rejected webhook forward body");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ForwardError { error }))
    })?;

    match state.deps.webhook.send(&body).await {
        Ok(status) => {
            info!(status, "Forwarded payload to webhook");
            Ok(Json(ForwardResponse {
                ok: true,
                sent_to_make: true,
                status_from_make: status,
            }))
        }
        Err(e) => {
            let error = match &e {
                WebhookError::NotConfigured => "MAKE_WEBHOOK_URL is not configured".to_string(),
                WebhookError::Network(_) => format!("Failed to send to the webhook: {}", e),
            };
            warn!(error = %error, "Webhook forward failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ForwardError { error })))
        }
    }
}
