//! Lenient section extraction from a generated draft.
//!
//! The model is asked for `Label: content` lines but nothing forces it to
//! comply, so extraction never fails: a label that cannot be found simply
//! leaves its slot empty and the author's current value untouched.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::prompts::DRAFT_LABELS;
use crate::domains::posts::form::{FormField, PostForm};

/// Start of the next section: a new line opening with a capitalized,
/// label-like token followed by a colon.
static SECTION_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[A-Z][\p{L} /]*:").unwrap());

/// Draft content split by label. `None` means the label was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftSections {
    pub title: Option<String>,
    pub value_proposition: Option<String>,
    pub problem_solution: Option<String>,
    pub backstory: Option<String>,
    pub local_connection: Option<String>,
    pub call_to_action: Option<String>,
}

impl DraftSections {
    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, value)| value.is_none())
    }

    /// Copy present sections into the form. Missing ones keep their value.
    pub fn apply_to(&self, form: &mut PostForm) {
        for (field, value) in self.entries() {
            if let Some(value) = value {
                form.set_field(field, value);
            }
        }
    }

    fn entries(&self) -> [(FormField, &Option<String>); 6] {
        [
            (FormField::Title, &self.title),
            (FormField::ValueProposition, &self.value_proposition),
            (FormField::ProblemSolution, &self.problem_solution),
            (FormField::Backstory, &self.backstory),
            (FormField::LocalConnection, &self.local_connection),
            (FormField::CallToAction, &self.call_to_action),
        ]
    }
}

/// Split a draft into its labeled sections.
pub fn extract_draft_sections(text: &str) -> DraftSections {
    let [title, value_proposition, problem_solution, backstory, local_connection, call_to_action] =
        DRAFT_LABELS.map(|label| extract_section(text, label));

    DraftSections {
        title,
        value_proposition,
        problem_solution,
        backstory,
        local_connection,
        call_to_action,
    }
}

/// Content after the first `label:` up to the next section boundary or the
/// end of the text, trimmed. Blank content counts as missing.
fn extract_section(text: &str, label: &str) -> Option<String> {
    let marker = format!("{}:", label);
    let start = text.find(&marker)? + marker.len();
    let rest = &text[start..];

    let end = SECTION_BOUNDARY
        .find(rest)
        .map(|m| m.start())
        .unwrap_or(rest.len());

    let content = rest[..end].trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}
