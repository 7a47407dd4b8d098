//! Server dependencies for actions (using traits for testability)
//!
//! Central dependency container handed to every form action. All external
//! services sit behind trait objects so tests can swap in the doubles from
//! `test_dependencies`.

use std::sync::Arc;

use crate::kernel::{BaseAI, BasePostStore, BaseWebhook};

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    /// Structured-output generator for every prompt template.
    pub ai: Arc<dyn BaseAI>,
    /// Document store for submitted posts.
    pub store: Arc<dyn BasePostStore>,
    /// Outbound automation webhook.
    pub webhook: Arc<dyn BaseWebhook>,
}

impl ServerDeps {
    pub fn new(
        ai: Arc<dyn BaseAI>,
        store: Arc<dyn BasePostStore>,
        webhook: Arc<dyn BaseWebhook>,
    ) -> Self {
        Self { ai, store, webhook }
    }
}
