//! Generation actions - draft, tone-optimized copy and platform previews.
//!
//! Each action validates the submitted fields, runs one or more generation
//! flows and folds the outcome into an `ActionResult`. Model errors are
//! logged with detail and reported to the author with a generic message.

use futures::future::{try_join, try_join_all};
use tracing::{error, info};

use crate::common::{Platform, Tone};
use crate::domains::generation::{
    extract_draft_sections, generate_content_draft, generate_content_with_tone,
    generate_platform_content, ContentOutput, ContentRequest, DraftRequest, GenerationError,
    PlatformRequest,
};
use crate::domains::posts::data::{keys, ActionOutcome, ActionResult, FormFields, PreviewSet};
use crate::kernel::{BaseAI, ServerDeps};

pub const DRAFT_INPUT_REQUIRED: &str = "An idea and a valid tone are required to generate a draft.";
pub const DRAFT_FAILED: &str = "Failed to generate the draft.";
pub const CONTENT_INPUT_REQUIRED: &str = "Base text and a valid tone are required.";
pub const CONTENT_FAILED: &str = "Failed to generate content.";
pub const PREVIEW_INPUT_REQUIRED: &str =
    "Base text and a valid tone are required to generate previews.";
pub const PREVIEW_FAILED: &str = "Failed to generate the previews.";
pub const CONTENT_AND_PREVIEWS_FAILED: &str = "Failed to generate content and previews.";

/// Platforms shown next to the optimized copy.
const SOCIAL_PLATFORMS: [Platform; 2] = [Platform::Facebook, Platform::Instagram];

fn tone_of(fields: &FormFields) -> Option<Tone> {
    fields.get(keys::TONE).and_then(|v| v.parse().ok())
}

/// Base text and tone, the input shared by content and preview actions.
fn text_and_tone(fields: &FormFields) -> Option<(String, Tone)> {
    let text = fields.get(keys::BASE_TEXT)?.to_string();
    let tone = tone_of(fields)?;
    Some((text, tone))
}

/// Structured draft from an idea: `data = { draft, sections }`.
pub async fn generate_draft_action(fields: &FormFields, deps: &ServerDeps) -> ActionResult {
    let (Some(idea), Some(tone)) = (fields.get(keys::IDEA), tone_of(fields)) else {
        return ActionResult::invalid(DRAFT_INPUT_REQUIRED, None);
    };

    info!(tone = %tone, "Generating draft");

    let request = DraftRequest {
        idea: idea.to_string(),
        tone,
    };

    match generate_content_draft(deps.ai.as_ref(), &request).await {
        Ok(output) => {
            let sections = extract_draft_sections(&output.draft);
            ActionResult::success(
                "Draft generated.",
                Some(serde_json::json!({
                    "draft": output.draft,
                    "sections": sections,
                })),
            )
        }
        Err(e) => generation_failed(DRAFT_FAILED, e),
    }
}

/// Short web/social copy: `data = { content }`.
pub async fn generate_content_action(fields: &FormFields, deps: &ServerDeps) -> ActionResult {
    let Some((text, tone)) = text_and_tone(fields) else {
        return ActionResult::invalid(CONTENT_INPUT_REQUIRED, None);
    };

    info!(tone = %tone, "Generating tone-optimized content");

    match generate_content_with_tone(deps.ai.as_ref(), &ContentRequest { text, tone }).await {
        Ok(output) => ActionResult::success(
            "Content generated.",
            Some(serde_json::json!({ "content": output.content })),
        ),
        Err(e) => generation_failed(CONTENT_FAILED, e),
    }
}

/// One preview per platform, generated concurrently: `data = PreviewSet`.
pub async fn generate_preview_action(fields: &FormFields, deps: &ServerDeps) -> ActionResult {
    let Some((text, tone)) = text_and_tone(fields) else {
        return ActionResult::invalid(PREVIEW_INPUT_REQUIRED, None);
    };

    info!(tone = %tone, platforms = Platform::ALL.len(), "Generating previews");

    match platform_previews(deps.ai.as_ref(), &text, tone, &Platform::ALL).await {
        Ok(contents) => {
            let mut previews = PreviewSet::default();
            for (platform, output) in Platform::ALL.iter().zip(contents) {
                set_preview(&mut previews, *platform, output.content);
            }
            ActionResult::success(
                "Previews generated.",
                serde_json::to_value(&previews).ok(),
            )
        }
        Err(e) => generation_failed(PREVIEW_FAILED, e),
    }
}

/// Optimized copy plus social previews in one round trip:
/// `data = { optimized_content, previews: { facebook, instagram } }`.
pub async fn generate_content_and_previews_action(
    fields: &FormFields,
    deps: &ServerDeps,
) -> ActionResult {
    let Some((text, tone)) = text_and_tone(fields) else {
        return ActionResult::invalid(CONTENT_INPUT_REQUIRED, None);
    };

    info!(tone = %tone, "Generating content and previews");

    let ai = deps.ai.as_ref();
    let content_request = ContentRequest {
        text: text.clone(),
        tone,
    };

    let joined = try_join(
        generate_content_with_tone(ai, &content_request),
        platform_previews(ai, &text, tone, &SOCIAL_PLATFORMS),
    )
    .await;

    match joined {
        Ok((content, previews)) => {
            let previews: serde_json::Map<String, serde_json::Value> = SOCIAL_PLATFORMS
                .iter()
                .zip(previews)
                .map(|(platform, output)| {
                    (platform.to_string(), serde_json::Value::String(output.content))
                })
                .collect();

            ActionResult::success(
                "Content and previews generated.",
                Some(serde_json::json!({
                    "optimized_content": content.content,
                    "previews": previews,
                })),
            )
        }
        Err(e) => generation_failed(CONTENT_AND_PREVIEWS_FAILED, e),
    }
}

/// Fan out one request per platform; the first failure fails the batch.
async fn platform_previews(
    ai: &dyn BaseAI,
    text: &str,
    tone: Tone,
    platforms: &[Platform],
) -> Result<Vec<ContentOutput>, GenerationError> {
    let requests: Vec<PlatformRequest> = platforms
        .iter()
        .map(|platform| PlatformRequest {
            text: text.to_string(),
            tone,
            platform: *platform,
        })
        .collect();

    try_join_all(
        requests
            .iter()
            .map(|request| generate_platform_content(ai, request)),
    )
    .await
}

fn set_preview(previews: &mut PreviewSet, platform: Platform, content: String) {
    match platform {
        Platform::Facebook => previews.facebook = content,
        Platform::Instagram => previews.instagram = content,
        Platform::Wordpress => previews.wordpress = content,
    }
}

fn generation_failed(message: &str, e: GenerationError) -> ActionResult {
    error!(error = %e, "{}", message);
    ActionResult::failure(ActionOutcome::Generation, message)
}
