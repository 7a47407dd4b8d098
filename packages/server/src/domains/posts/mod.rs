pub mod actions;
pub mod data;
pub mod form;
pub mod models;

// Re-export data types
pub use data::{ActionOutcome, ActionResult, FormFields, PreviewSet};

// Re-export the editor state
pub use form::{FormField, PostForm};

// Re-export models (domain models)
pub use models::post::{Category, Post, PostContent, PostStatus, PostType};
