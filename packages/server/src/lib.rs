// MultiPost - API Core
//
// Backend for the content drafting dashboard: AI drafts from an idea and a
// tone, platform previews, and publishing through a store plus an outbound
// automation webhook.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
