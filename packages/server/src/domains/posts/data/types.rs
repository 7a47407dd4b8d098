use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names of a post submission.
pub mod keys {
    pub const IDEA: &str = "idea";
    pub const TONE: &str = "tone";
    pub const CATEGORY: &str = "category";
    pub const POST_TYPE: &str = "post_type";
    pub const TITLE: &str = "title";
    pub const VALUE_PROPOSITION: &str = "value_proposition";
    pub const PROBLEM_SOLUTION: &str = "problem_solution";
    pub const BACKSTORY: &str = "backstory";
    pub const LOCAL_CONNECTION: &str = "local_connection";
    pub const CALL_TO_ACTION: &str = "call_to_action";
    pub const BASE_TEXT: &str = "base_text";
    pub const IMAGE_URL: &str = "image_url";
    pub const PRODUCT_NAME: &str = "product_name";
    pub const PRICE: &str = "price";
    pub const PRODUCT_DESCRIPTION: &str = "product_description";
}

/// Submitted form values, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and form serialization.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Trimmed value or the empty string.
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Per-field validation messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Failure categories an action can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Success,
    /// Input rejected before anything ran
    Validation,
    /// Model call failed or returned an unusable reply
    Generation,
    /// Record could not be written
    Persistence,
    /// Record written, webhook delivery failed
    Delivery,
}

/// Result of a form action, returned to the caller as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip)]
    pub outcome: Option<ActionOutcome>,
}

impl ActionResult {
    pub fn success(message: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            errors: None,
            outcome: Some(ActionOutcome::Success),
        }
    }

    pub fn invalid(message: impl Into<String>, errors: Option<FieldErrors>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
            outcome: Some(ActionOutcome::Validation),
        }
    }

    pub fn failure(outcome: ActionOutcome, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
            outcome: Some(outcome),
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn outcome(&self) -> ActionOutcome {
        self.outcome.unwrap_or(if self.success {
            ActionOutcome::Success
        } else {
            ActionOutcome::Generation
        })
    }
}

/// One preview per platform. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSet {
    pub facebook: String,
    pub instagram: String,
    #[serde(default)]
    pub wordpress: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_trim_and_blank() {
        let fields = FormFields::new()
            .with(keys::TITLE, "  Hello  ")
            .with(keys::IDEA, "   ");

        assert_eq!(fields.get(keys::TITLE), Some("Hello"));
        assert_eq!(fields.get(keys::IDEA), None);
        assert_eq!(fields.get(keys::PRICE), None);
        assert_eq!(fields.text(keys::PRICE), "");
    }

    #[test]
    fn test_action_result_serialization_skips_empty_parts() {
        let result = ActionResult::success("Draft generated.", None);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Draft generated."})
        );
    }

    #[test]
    fn test_outcome_defaults_for_deserialized_results() {
        let result: ActionResult =
            serde_json::from_str(r#"{"success": false, "message": "x"}"#).unwrap();
        assert_eq!(result.outcome(), ActionOutcome::Generation);
    }
}
