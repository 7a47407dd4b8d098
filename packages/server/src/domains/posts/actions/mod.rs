//! Posts domain actions - entry-point business logic
//!
//! Called directly from the HTTP routes. Actions are self-contained: they
//! take the raw submitted fields, validate them and return an `ActionResult`.

pub mod generate;
pub mod publish;

pub use generate::{
    generate_content_action, generate_content_and_previews_action, generate_draft_action,
    generate_preview_action,
};
pub use publish::publish_action;
