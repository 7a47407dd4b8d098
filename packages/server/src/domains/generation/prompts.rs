//! Prompt templates for the generation flows.
//!
//! Each template is a system prompt plus a user prompt rendered from the
//! request. The expected reply shape is carried separately by the flow as a
//! JSON schema, so the templates only describe the writing task.

use crate::common::{Platform, Tone};

/// Labels the draft prompt asks for, in the order the model should emit them.
pub const DRAFT_LABELS: [&str; 6] = [
    "Title",
    "Value proposition",
    "Problem / solution",
    "Backstory / context",
    "Local connection",
    "Suggested CTA",
];

/// Appended verbatim to every tone-optimized post.
pub const REQUIRED_HASHTAGS: &str = "#MultiPostFlow #IA #ContentCreation #MarketingDigital";

/// Upper bound for tone-optimized copy.
pub const MAX_CONTENT_CHARS: usize = 280;

// =============================================================================
// Draft
// =============================================================================

pub const DRAFT_SYSTEM_PROMPT: &str = r#"You are a content creation assistant for a regional marketing team.

Turn a short idea into a structured post draft written in the requested tone.

## Output format
Put the whole draft in the `draft` field as plain text, one section per line, each line formatted exactly as `Label: content`:
Title: [content]
Value proposition: [content]
Problem / solution: [content]
Backstory / context: [content]
Local connection: [content]
Suggested CTA: [content]

## Rules
- Use every label exactly once, spelled exactly as above
- Do not add markdown, bullet points or extra sections
- Keep each section to one or two sentences
"#;

pub fn render_draft_prompt(idea: &str, tone: Tone) -> String {
    format!(
        "Idea: {}\nTone: {}\n\n{}",
        idea.trim(),
        tone,
        tone_guidance(tone)
    )
}

// =============================================================================
// Tone-optimized copy
// =============================================================================

pub fn content_system_prompt() -> String {
    format!(
        r#"You are an expert content creator. Rewrite the text into copy optimized for the web and social media in the requested tone.

## Rules
- The final content must be concise, at most {} characters including hashtags
- The content MUST end with this exact hashtag line: {}
- Return only the copy in the `content` field, no commentary
"#,
        MAX_CONTENT_CHARS, REQUIRED_HASHTAGS
    )
}

pub fn render_content_prompt(text: &str, tone: Tone) -> String {
    format!(
        "Text: {}\nTone: {}\n\n{}",
        text.trim(),
        tone,
        tone_guidance(tone)
    )
}

// =============================================================================
// Platform previews
// =============================================================================

pub const PLATFORM_SYSTEM_PROMPT: &str = r#"You are an expert social media manager.

Adapt the draft into a post for the requested platform, in the requested tone. Follow the platform's conventions for length, structure and hashtags.

Return only the finished post in the `content` field, no commentary.
"#;

pub fn render_platform_prompt(text: &str, tone: Tone, platform: Platform) -> String {
    format!(
        "Platform: {}\nDraft: {}\nTone: {}\n\n{}\n{}",
        platform,
        text.trim(),
        tone,
        platform_guidance(platform),
        tone_guidance(tone)
    )
}

fn platform_guidance(platform: Platform) -> &'static str {
    match platform {
        Platform::Facebook => {
            "Facebook: a conversational post of a few short paragraphs, ending with a clear call to action."
        }
        Platform::Instagram => {
            "Instagram: a short caption that works under an image, line breaks between ideas, a block of relevant hashtags at the end."
        }
        Platform::Wordpress => {
            "WordPress: a blog article with a headline, an introduction and short sections with subheadings."
        }
    }
}

fn tone_guidance(tone: Tone) -> &'static str {
    match tone {
        Tone::Persuasive => "Write persuasively: lead with the benefit and push toward action.",
        Tone::Strategic => "Write strategically: position the offer against the audience's goals.",
        Tone::Influencer => "Write like an influencer: first person, casual and enthusiastic.",
        Tone::Inspirational => "Write inspirationally: uplifting, centered on people and possibility.",
        Tone::Journalistic => "Write journalistically: factual, neutral, who/what/where first.",
        Tone::Corporate => "Write in a corporate voice: formal, precise, brand-safe.",
        Tone::Humorous => "Write humorously: light and playful without hiding the message.",
    }
}
