//! Post editor state.
//!
//! Holds what the author is editing between actions: every submission field,
//! the derived base text and the latest previews. Data flows one way, from
//! action results into the form and from the form into the next submission.

use serde::{Deserialize, Serialize};

use super::data::{keys, FormFields, PreviewSet};
use super::models::{Category, PostType};
use crate::common::Tone;
use crate::domains::generation::{extract_draft_sections, ContentOutput, DraftOutput};

/// Free-text fields of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Idea,
    Title,
    ValueProposition,
    ProblemSolution,
    Backstory,
    LocalConnection,
    CallToAction,
    BaseText,
    ImageUrl,
    ProductName,
    Price,
    ProductDescription,
}

impl FormField {
    /// Body segments, in the order they are joined into the base text.
    pub const SEGMENTS: [FormField; 5] = [
        FormField::ValueProposition,
        FormField::ProblemSolution,
        FormField::Backstory,
        FormField::LocalConnection,
        FormField::CallToAction,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FormField::Idea => keys::IDEA,
            FormField::Title => keys::TITLE,
            FormField::ValueProposition => keys::VALUE_PROPOSITION,
            FormField::ProblemSolution => keys::PROBLEM_SOLUTION,
            FormField::Backstory => keys::BACKSTORY,
            FormField::LocalConnection => keys::LOCAL_CONNECTION,
            FormField::CallToAction => keys::CALL_TO_ACTION,
            FormField::BaseText => keys::BASE_TEXT,
            FormField::ImageUrl => keys::IMAGE_URL,
            FormField::ProductName => keys::PRODUCT_NAME,
            FormField::Price => keys::PRICE,
            FormField::ProductDescription => keys::PRODUCT_DESCRIPTION,
        }
    }

    pub fn is_segment(self) -> bool {
        Self::SEGMENTS.contains(&self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    pub idea: String,
    pub tone: Tone,
    pub category: Option<Category>,
    pub post_type: PostType,
    pub title: String,
    pub value_proposition: String,
    pub problem_solution: String,
    pub backstory: String,
    pub local_connection: String,
    pub call_to_action: String,
    pub base_text: String,
    pub image_url: String,
    pub product_name: String,
    pub price: String,
    pub product_description: String,
    pub previews: PreviewSet,
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Idea => &self.idea,
            FormField::Title => &self.title,
            FormField::ValueProposition => &self.value_proposition,
            FormField::ProblemSolution => &self.problem_solution,
            FormField::Backstory => &self.backstory,
            FormField::LocalConnection => &self.local_connection,
            FormField::CallToAction => &self.call_to_action,
            FormField::BaseText => &self.base_text,
            FormField::ImageUrl => &self.image_url,
            FormField::ProductName => &self.product_name,
            FormField::Price => &self.price,
            FormField::ProductDescription => &self.product_description,
        }
    }

    /// Update one field. Editing a body segment rebuilds the base text.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            FormField::Idea => &mut self.idea,
            FormField::Title => &mut self.title,
            FormField::ValueProposition => &mut self.value_proposition,
            FormField::ProblemSolution => &mut self.problem_solution,
            FormField::Backstory => &mut self.backstory,
            FormField::LocalConnection => &mut self.local_connection,
            FormField::CallToAction => &mut self.call_to_action,
            FormField::BaseText => &mut self.base_text,
            FormField::ImageUrl => &mut self.image_url,
            FormField::ProductName => &mut self.product_name,
            FormField::Price => &mut self.price,
            FormField::ProductDescription => &mut self.product_description,
        };
        *slot = value;

        if field.is_segment() {
            self.base_text = self.compose_base_text();
        }
    }

    /// Non-empty segments, trimmed, separated by a blank line.
    pub fn compose_base_text(&self) -> String {
        FormField::SEGMENTS
            .iter()
            .map(|segment| self.field(*segment).trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Copy whatever sections the draft contains into the form.
    ///
    /// The base text is only rebuilt through `set_field` when a body segment
    /// is present, so a title-only draft leaves hand-edited copy alone.
    pub fn apply_draft(&mut self, draft: &DraftOutput) {
        extract_draft_sections(&draft.draft).apply_to(self);
    }

    /// Replace the base text with optimized copy.
    pub fn apply_content(&mut self, content: &ContentOutput) {
        self.base_text = content.content.clone();
    }

    pub fn apply_previews(&mut self, previews: PreviewSet) {
        self.previews = previews;
    }

    /// The field map a submission of this form carries.
    pub fn to_fields(&self) -> FormFields {
        let mut fields = FormFields::new()
            .with(keys::TONE, self.tone.as_str())
            .with(keys::POST_TYPE, self.post_type.to_string());

        if let Some(category) = self.category {
            fields.insert(keys::CATEGORY, category.to_string());
        }

        for field in [
            FormField::Idea,
            FormField::Title,
            FormField::ValueProposition,
            FormField::ProblemSolution,
            FormField::Backstory,
            FormField::LocalConnection,
            FormField::CallToAction,
            FormField::BaseText,
            FormField::ImageUrl,
            FormField::ProductName,
            FormField::Price,
            FormField::ProductDescription,
        ] {
            fields.insert(field.key(), self.field(field));
        }

        fields
    }

    /// Back to a blank form after a successful publish.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
