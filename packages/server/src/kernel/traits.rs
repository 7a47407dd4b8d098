// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompts, validation and the publish state machine live in the domains and
// only talk to the outside world through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BasePostStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::PostId;
use crate::domains::posts::models::{Post, PostContent, PostStatus};

use super::webhook::WebhookError;

// =============================================================================
// AI Trait (Infrastructure - hosted language model)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Generate output constrained to `schema`.
    ///
    /// Returns the raw JSON text; callers deserialize it into their own shape.
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<String>;
}

// =============================================================================
// Post Store Trait (Infrastructure - document persistence)
// =============================================================================

#[async_trait]
pub trait BasePostStore: Send + Sync {
    /// Persist a new record with status `draft` and a fresh id.
    async fn create(&self, content: &PostContent) -> Result<Post>;

    /// Move a draft to `published` or `error`. Fails for any other transition.
    async fn update_status(&self, id: PostId, status: PostStatus) -> Result<Post>;

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>>;

    /// Cheap liveness check used by `/health`.
    async fn ping(&self) -> Result<()>;
}

// =============================================================================
// Webhook Trait (Infrastructure - outbound automation hook)
// =============================================================================

#[async_trait]
pub trait BaseWebhook: Send + Sync {
    fn is_configured(&self) -> bool;

    /// POST `body` once and return the receiver's HTTP status, whatever it is.
    async fn send(&self, body: &serde_json::Value) -> std::result::Result<u16, WebhookError>;
}
