//! Publish action - persist a draft, then hand it to the webhook once.
//!
//! ```text
//! absent --valid submission--> draft --2xx--------------------> published
//!                                    --unconfigured/network/non-2xx--> error
//! ```
//!
//! A record that reached the store is never rolled back: whatever happens to
//! the delivery, the author's content stays saved.

use tracing::{error, info, warn};

use crate::domains::posts::data::{validate_submission, ActionOutcome, ActionResult, FormFields};
use crate::domains::posts::models::{Post, PostStatus};
use crate::kernel::{is_success_status, ServerDeps, WebhookError};

pub const FIX_FORM_ERRORS: &str = "Please fix the errors in the form.";
pub const WEBHOOK_NOT_CONFIGURED: &str =
    "Draft saved, but publishing failed: the webhook is not configured.";

/// Validate, store as `draft`, POST to the webhook, settle the status.
pub async fn publish_action(fields: &FormFields, deps: &ServerDeps) -> ActionResult {
    let content = match validate_submission(fields) {
        Ok(content) => content,
        Err(errors) => {
            info!(fields = ?errors.keys().collect::<Vec<_>>(), "Publish rejected by validation");
            return ActionResult::invalid(FIX_FORM_ERRORS, Some(errors));
        }
    };

    let post = match deps.store.create(&content).await {
        Ok(post) => post,
        Err(e) => {
            error!(error = %e, "Failed to save draft");
            return ActionResult::failure(
                ActionOutcome::Persistence,
                format!("Failed to save the draft: {}", e),
            );
        }
    };

    info!(post_id = %post.id, post_type = %post.content.post_type, "Draft saved");

    if !deps.webhook.is_configured() {
        warn!(post_id = %post.id, "MAKE_WEBHOOK_URL is not set, marking post as error");
        return delivery_failed(&post, WEBHOOK_NOT_CONFIGURED.to_string(), deps).await;
    }

    let payload = match serde_json::to_value(&post) {
        Ok(payload) => payload,
        Err(e) => {
            return delivery_failed(
                &post,
                format!("Draft saved, but publishing failed: {}", e),
                deps,
            )
            .await
        }
    };

    match deps.webhook.send(&payload).await {
        Ok(status) if is_success_status(status) => published(&post, deps).await,
        Ok(status) => {
            warn!(post_id = %post.id, status, "Webhook rejected post");
            delivery_failed(
                &post,
                format!(
                    "Draft saved, but publishing failed: the webhook responded with status {}.",
                    status
                ),
                deps,
            )
            .await
        }
        Err(WebhookError::NotConfigured) => {
            delivery_failed(&post, WEBHOOK_NOT_CONFIGURED.to_string(), deps).await
        }
        Err(e) => {
            warn!(post_id = %post.id, error = %e, "Webhook delivery failed");
            delivery_failed(
                &post,
                format!("Draft saved, but publishing failed: {}.", e),
                deps,
            )
            .await
        }
    }
}

async fn published(post: &Post, deps: &ServerDeps) -> ActionResult {
    match deps.store.update_status(post.id, PostStatus::Published).await {
        Ok(updated) => {
            info!(post_id = %updated.id, status = %updated.status, "Post published");
            ActionResult::success(
                format!("Post \"{}\" sent successfully.", updated.content.title),
                Some(status_data(&updated)),
            )
        }
        Err(e) => {
            error!(post_id = %post.id, error = %e, "Post delivered but status update failed");
            ActionResult::failure(
                ActionOutcome::Persistence,
                format!("Post sent, but its status could not be updated: {}", e),
            )
            .with_data(status_data(post))
        }
    }
}

async fn delivery_failed(post: &Post, message: String, deps: &ServerDeps) -> ActionResult {
    let post = match deps.store.update_status(post.id, PostStatus::Error).await {
        Ok(updated) => {
            info!(post_id = %updated.id, status = %updated.status, "Post marked as error");
            updated
        }
        Err(e) => {
            error!(post_id = %post.id, error = %e, "Failed to mark post as error");
            post.clone()
        }
    };

    ActionResult::failure(ActionOutcome::Delivery, message).with_data(status_data(&post))
}

fn status_data(post: &Post) -> serde_json::Value {
    serde_json::json!({
        "id": post.id,
        "status": post.status,
    })
}
