//! Generation domain - prompt templates, model calls and draft parsing.

pub mod extraction;
pub mod flows;
pub mod prompts;

pub use extraction::{extract_draft_sections, DraftSections};
pub use flows::{
    generate_content_draft, generate_content_with_tone, generate_platform_content,
    ContentOutput, ContentRequest, DraftOutput, DraftRequest, PlatformRequest,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("model call failed: {0}")]
    Ai(String),

    #[error("model reply did not match the expected shape: {0}")]
    InvalidShape(String),
}
