//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod llm_request;
pub mod post_store;
pub mod test_dependencies;
pub mod traits;
pub mod webhook;

pub use deps::ServerDeps;
pub use llm_request::OpenAIGenerator;
pub use post_store::PostgresPostStore;
pub use test_dependencies::{InMemoryPostStore, MockAI, MockWebhook, TestDependencies};
pub use traits::*;
pub use webhook::{is_success_status, HttpWebhook, WebhookError};
