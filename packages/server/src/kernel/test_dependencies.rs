// TestDependencies - mock implementations for testing
//
// Provides doubles for every infrastructure trait so actions and routes can
// be exercised without a database, a model provider or a webhook receiver.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::webhook::WebhookError;
use super::{BaseAI, BasePostStore, BaseWebhook, ServerDeps};
use crate::common::PostId;
use crate::domains::posts::models::{Post, PostContent, PostStatus};

// =============================================================================
// Mock AI
// =============================================================================

/// Arguments captured from a generation call
#[derive(Debug, Clone)]
pub struct AiCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub schema_name: String,
}

enum MockReply {
    Text(String),
    Fail(String),
}

/// Replies are picked by the first registered pattern found in the user
/// prompt, then from the FIFO queue, then a default shaped like the schema.
///
/// Pattern routing keeps concurrent fan-out calls deterministic.
pub struct MockAI {
    routed: Mutex<Vec<(String, MockReply)>>,
    queue: Mutex<Vec<MockReply>>,
    calls: Mutex<Vec<AiCall>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            routed: Mutex::new(Vec::new()),
            queue: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a raw response
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.queue
            .lock()
            .unwrap()
            .push(MockReply::Text(response.into()));
        self
    }

    /// Queue a JSON response (will be serialized)
    pub fn with_json_response(self, data: serde_json::Value) -> Self {
        self.with_response(data.to_string())
    }

    /// Queue a failing call
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.queue
            .lock()
            .unwrap()
            .push(MockReply::Fail(message.into()));
        self
    }

    /// Answer every prompt containing `pattern` with `response`
    pub fn with_response_for(self, pattern: &str, response: serde_json::Value) -> Self {
        self.routed
            .lock()
            .unwrap()
            .push((pattern.to_string(), MockReply::Text(response.to_string())));
        self
    }

    /// Fail every prompt containing `pattern`
    pub fn with_failure_for(self, pattern: &str) -> Self {
        self.routed.lock().unwrap().push((
            pattern.to_string(),
            MockReply::Fail(format!("mock failure for '{}'", pattern)),
        ));
        self
    }

    pub fn calls(&self) -> Vec<AiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Check if a prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.user_prompt.contains(text))
    }

    fn reply_for(&self, user_prompt: &str, schema_name: &str) -> Result<String> {
        let routed = self.routed.lock().unwrap();
        if let Some((_, reply)) = routed.iter().find(|(p, _)| user_prompt.contains(p.as_str())) {
            return match reply {
                MockReply::Text(text) => Ok(text.clone()),
                MockReply::Fail(msg) => Err(anyhow::anyhow!("{}", msg)),
            };
        }
        drop(routed);

        let mut queue = self.queue.lock().unwrap();
        if !queue.is_empty() {
            return match queue.remove(0) {
                MockReply::Text(text) => Ok(text),
                MockReply::Fail(msg) => Err(anyhow::anyhow!("{}", msg)),
            };
        }

        // Default reply shaped after the two output types the flows use
        Ok(match schema_name {
            "DraftOutput" => serde_json::json!({ "draft": "Title: Mock draft" }),
            _ => serde_json::json!({ "content": "Mock AI response" }),
        }
        .to_string())
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema_name: &str,
        _schema: serde_json::Value,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(AiCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            schema_name: schema_name.to_string(),
        });

        self.reply_for(user_prompt, schema_name)
    }
}

// =============================================================================
// In-memory Post Store
// =============================================================================

pub struct InMemoryPostStore {
    posts: Mutex<HashMap<PostId, Post>>,
    fail_create: bool,
    fail_update: bool,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(HashMap::new()),
            fail_create: false,
            fail_update: false,
        }
    }

    /// Make every `create` fail (persistence outage)
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Make every `update_status` fail
    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub fn all(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.lock().unwrap().values().cloned().collect();
        posts.sort_by_key(|p| p.id);
        posts
    }

    pub fn count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePostStore for InMemoryPostStore {
    async fn create(&self, content: &PostContent) -> Result<Post> {
        if self.fail_create {
            anyhow::bail!("in-memory store unavailable");
        }

        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            content: content.clone(),
            status: PostStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        self.posts.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_status(&self, id: PostId, status: PostStatus) -> Result<Post> {
        if self.fail_update {
            anyhow::bail!("in-memory store unavailable");
        }

        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Post {} not found", id))?;

        if !post.status.can_transition_to(status) {
            anyhow::bail!(
                "Invalid post status transition: {} -> {}",
                post.status,
                status
            );
        }

        post.status = status;
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>> {
        Ok(self.posts.lock().unwrap().get(&id).cloned())
    }

    async fn ping(&self) -> Result<()> {
        if self.fail_create {
            anyhow::bail!("in-memory store unavailable");
        }
        Ok(())
    }
}

// =============================================================================
// Mock Webhook
// =============================================================================

enum WebhookBehavior {
    Status(u16),
    NetworkError,
    NotConfigured,
}

pub struct MockWebhook {
    behavior: WebhookBehavior,
    deliveries: Mutex<Vec<serde_json::Value>>,
}

impl MockWebhook {
    /// Configured webhook answering 200
    pub fn new() -> Self {
        Self::responding(200)
    }

    pub fn responding(status: u16) -> Self {
        Self {
            behavior: WebhookBehavior::Status(status),
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            behavior: WebhookBehavior::NetworkError,
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            behavior: WebhookBehavior::NotConfigured,
            deliveries: Mutex::new(Vec::new()),
        }
    }

    /// Every body that reached the (mock) network
    pub fn deliveries(&self) -> Vec<serde_json::Value> {
        self.deliveries.lock().unwrap().clone()
    }
}

impl Default for MockWebhook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseWebhook for MockWebhook {
    fn is_configured(&self) -> bool {
        !matches!(self.behavior, WebhookBehavior::NotConfigured)
    }

    async fn send(&self, body: &serde_json::Value) -> std::result::Result<u16, WebhookError> {
        match self.behavior {
            WebhookBehavior::NotConfigured => Err(WebhookError::NotConfigured),
            WebhookBehavior::NetworkError => {
                self.deliveries.lock().unwrap().push(body.clone());
                Err(WebhookError::Network("connection refused".to_string()))
            }
            WebhookBehavior::Status(status) => {
                self.deliveries.lock().unwrap().push(body.clone());
                Ok(status)
            }
        }
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub ai: Arc<MockAI>,
    pub store: Arc<InMemoryPostStore>,
    pub webhook: Arc<MockWebhook>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            ai: Arc::new(MockAI::new()),
            store: Arc::new(InMemoryPostStore::new()),
            webhook: Arc::new(MockWebhook::new()),
        }
    }

    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    pub fn mock_store(mut self, store: InMemoryPostStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    pub fn mock_webhook(mut self, webhook: MockWebhook) -> Self {
        self.webhook = Arc::new(webhook);
        self
    }

    /// Convert into ServerDeps, keeping typed handles on `self` for assertions
    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(self.ai.clone(), self.store.clone(), self.webhook.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
