//! Test fixtures for building submissions.

use multipost_core::domains::posts::data::keys;
use multipost_core::domains::posts::FormFields;

/// A complete, valid article submission.
pub fn article_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        (keys::IDEA, "Harvest festival in the valley"),
        (keys::TONE, "persuasive"),
        (keys::POST_TYPE, "article"),
        (keys::CATEGORY, "culture_and_art"),
        (keys::TITLE, "Harvest festival returns"),
        (keys::VALUE_PROPOSITION, "Three days of local music and food"),
        (keys::PROBLEM_SOLUTION, "Few weekend plans in town; now there is one"),
        (keys::BACKSTORY, "Started by farmers in 1998"),
        (
            keys::BASE_TEXT,
            "Three days of local music and food\n\nFew weekend plans in town; now there is one",
        ),
    ]
}

pub fn as_form_fields(pairs: &[(&str, &str)]) -> FormFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Replace or add one pair.
pub fn with_field(
    mut pairs: Vec<(&'static str, &'static str)>,
    key: &'static str,
    value: &'static str,
) -> Vec<(&'static str, &'static str)> {
    pairs.retain(|(k, _)| *k != key);
    pairs.push((key, value));
    pairs
}
