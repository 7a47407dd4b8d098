//! Generation flows: one function per prompt template.
//!
//! Every flow renders its prompt, asks the model for output constrained to
//! the output type's schema, then validates the reply. One attempt, no retry.

use openai_client::{strip_code_blocks, StructuredOutput};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::prompts;
use super::GenerationError;
use crate::common::{Platform, Tone};
use crate::kernel::BaseAI;

// =============================================================================
// Requests and outputs
// =============================================================================

#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub idea: String,
    pub tone: Tone,
}

#[derive(Debug, Clone)]
pub struct ContentRequest {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone)]
pub struct PlatformRequest {
    pub text: String,
    pub tone: Tone,
    pub platform: Platform,
}

/// Structured draft text, one `Label: content` line per section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DraftOutput {
    /// The full draft, formatted as "Label: content" lines
    pub draft: String,
}

/// Finished copy for the web, social media or one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContentOutput {
    /// The generated copy
    pub content: String,
}

trait NonBlank {
    fn text(&self) -> &str;
}

impl NonBlank for DraftOutput {
    fn text(&self) -> &str {
        &self.draft
    }
}

impl NonBlank for ContentOutput {
    fn text(&self) -> &str {
        &self.content
    }
}

// =============================================================================
// Flows
// =============================================================================

/// Structured draft from an idea and a tone.
pub async fn generate_content_draft(
    ai: &dyn BaseAI,
    request: &DraftRequest,
) -> Result<DraftOutput, GenerationError> {
    let user_prompt = prompts::render_draft_prompt(&request.idea, request.tone);
    run::<DraftOutput>(ai, prompts::DRAFT_SYSTEM_PROMPT, &user_prompt).await
}

/// Short web/social copy in the requested tone, ending with the fixed hashtags.
pub async fn generate_content_with_tone(
    ai: &dyn BaseAI,
    request: &ContentRequest,
) -> Result<ContentOutput, GenerationError> {
    let user_prompt = prompts::render_content_prompt(&request.text, request.tone);
    run::<ContentOutput>(ai, &prompts::content_system_prompt(), &user_prompt).await
}

/// Copy adapted to a single platform.
pub async fn generate_platform_content(
    ai: &dyn BaseAI,
    request: &PlatformRequest,
) -> Result<ContentOutput, GenerationError> {
    let user_prompt =
        prompts::render_platform_prompt(&request.text, request.tone, request.platform);
    run::<ContentOutput>(ai, prompts::PLATFORM_SYSTEM_PROMPT, &user_prompt).await
}

async fn run<T>(ai: &dyn BaseAI, system_prompt: &str, user_prompt: &str) -> Result<T, GenerationError>
where
    T: StructuredOutput + NonBlank,
{
    let schema_name = T::type_name();
    let raw = ai
        .generate_structured(system_prompt, user_prompt, &schema_name, T::openai_schema())
        .await
        .map_err(|e| {
            warn!(schema = %schema_name, error = %e, "Generation call failed");
            GenerationError::Ai(e.to_string())
        })?;

    let output = parse_output::<T>(&raw)?;
    debug!(schema = %schema_name, length = output.text().len(), "Generation succeeded");
    Ok(output)
}

/// Deserialize a model reply, tolerating markdown code fences.
fn parse_output<T>(raw: &str) -> Result<T, GenerationError>
where
    T: StructuredOutput + NonBlank,
{
    let output: T = serde_json::from_str(strip_code_blocks(raw))
        .map_err(|e| GenerationError::InvalidShape(e.to_string()))?;

    if output.text().trim().is_empty() {
        return Err(GenerationError::InvalidShape(
            "model returned an empty text field".to_string(),
        ));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockAI;

    #[tokio::test]
    async fn test_draft_flow_sends_schema_and_parses_reply() {
        let ai = MockAI::new().with_json_response(serde_json::json!({
            "draft": "Title: Sunset tours\nValue proposition: Best views"
        }));

        let output = generate_content_draft(
            &ai,
            &DraftRequest {
                idea: "Sunset boat tours".into(),
                tone: Tone::Inspirational,
            },
        )
        .await
        .unwrap();

        assert!(output.draft.starts_with("Title: Sunset tours"));

        let calls = ai.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].schema_name, "DraftOutput");
        assert!(calls[0].user_prompt.contains("Idea: Sunset boat tours"));
        assert!(calls[0].user_prompt.contains("Tone: inspirational"));
    }

    #[tokio::test]
    async fn test_fenced_reply_is_accepted() {
        let ai = MockAI::new().with_response("```json\n{\"content\": \"Fresh copy\"}\n```");

        let output = generate_content_with_tone(
            &ai,
            &ContentRequest {
                text: "Base".into(),
                tone: Tone::Corporate,
            },
        )
        .await
        .unwrap();

        assert_eq!(output.content, "Fresh copy");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_invalid_shape() {
        let ai = MockAI::new().with_json_response(serde_json::json!({ "text": "nope" }));

        let err = generate_content_with_tone(
            &ai,
            &ContentRequest {
                text: "Base".into(),
                tone: Tone::Persuasive,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GenerationError::InvalidShape(_)));
    }

    #[tokio::test]
    async fn test_non_string_field_is_invalid_shape() {
        let ai = MockAI::new().with_json_response(serde_json::json!({ "content": 42 }));

        let err = generate_platform_content(
            &ai,
            &PlatformRequest {
                text: "Base".into(),
                tone: Tone::Persuasive,
                platform: Platform::Facebook,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GenerationError::InvalidShape(_)));
    }

    #[tokio::test]
    async fn test_blank_reply_is_invalid_shape() {
        let ai = MockAI::new().with_json_response(serde_json::json!({ "draft": "   " }));

        let err = generate_content_draft(
            &ai,
            &DraftRequest {
                idea: "Idea".into(),
                tone: Tone::Strategic,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GenerationError::InvalidShape(_)));
    }

    #[tokio::test]
    async fn test_ai_failure_is_reported_once() {
        let ai = MockAI::new().with_failure("rate limited");

        let err = generate_platform_content(
            &ai,
            &PlatformRequest {
                text: "Base".into(),
                tone: Tone::Humorous,
                platform: Platform::Wordpress,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GenerationError::Ai(ref msg) if msg.contains("rate limited")));
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_platform_prompt_reaches_model() {
        let ai = MockAI::new();

        generate_platform_content(
            &ai,
            &PlatformRequest {
                text: "Harvest fair".into(),
                tone: Tone::Journalistic,
                platform: Platform::Wordpress,
            },
        )
        .await
        .unwrap();

        assert!(ai.was_called_with("Platform: wordpress"));
        assert!(ai.was_called_with("Draft: Harvest fair"));
    }
}
