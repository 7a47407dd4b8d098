//! Validation of a full post submission.
//!
//! Text requirements are declared on `PostSubmission` with `validator`;
//! enum parsing and the product-only requirements are checked by hand and
//! merged into the same error set.

use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use super::types::{keys, FieldErrors, FormFields};
use crate::common::Tone;
use crate::domains::posts::models::{Category, PostContent, PostType};

pub const TONE_REQUIRED: &str = "Select a valid tone.";
pub const POST_TYPE_REQUIRED: &str = "Select a valid post type.";
pub const CATEGORY_INVALID: &str = "Select a valid category.";
pub const PRODUCT_NAME_REQUIRED: &str = "The product name is required.";
pub const PRICE_REQUIRED: &str = "The price is required.";

#[derive(Debug, Clone, Validate)]
struct PostSubmission {
    #[validate(length(min = 1, message = "The post title is required."))]
    title: String,
    #[validate(length(min = 1, message = "The value proposition is required."))]
    value_proposition: String,
    #[validate(length(min = 1, message = "The problem / solution field is required."))]
    problem_solution: String,
    #[validate(length(min = 1, message = "The base text cannot be empty."))]
    base_text: String,
}

impl PostSubmission {
    fn from_fields(fields: &FormFields) -> Self {
        Self {
            title: fields.text(keys::TITLE),
            value_proposition: fields.text(keys::VALUE_PROPOSITION),
            problem_solution: fields.text(keys::PROBLEM_SOLUTION),
            base_text: fields.text(keys::BASE_TEXT),
        }
    }
}

/// Validate submitted fields into storable post content.
///
/// On failure every offending field is reported at once, keyed by its
/// submission name.
pub fn validate_submission(fields: &FormFields) -> Result<PostContent, FieldErrors> {
    let submission = PostSubmission::from_fields(fields);
    let mut errors = submission.validate().err().unwrap_or_else(ValidationErrors::new);

    let tone = fields.get(keys::TONE).and_then(|v| v.parse::<Tone>().ok());
    if tone.is_none() {
        errors.add(keys::TONE, field_error("tone", TONE_REQUIRED));
    }

    let post_type = fields
        .get(keys::POST_TYPE)
        .and_then(|v| v.parse::<PostType>().ok());
    if post_type.is_none() {
        errors.add(keys::POST_TYPE, field_error("post_type", POST_TYPE_REQUIRED));
    }

    let category = match fields.get(keys::CATEGORY) {
        None => None,
        Some(raw) => match raw.parse::<Category>() {
            Ok(category) => Some(category),
            Err(_) => {
                errors.add(keys::CATEGORY, field_error("category", CATEGORY_INVALID));
                None
            }
        },
    };

    if post_type == Some(PostType::Product) {
        if fields.get(keys::PRODUCT_NAME).is_none() {
            errors.add(keys::PRODUCT_NAME, field_error("required", PRODUCT_NAME_REQUIRED));
        }
        if fields.get(keys::PRICE).is_none() {
            errors.add(keys::PRICE, field_error("required", PRICE_REQUIRED));
        }
    }

    let (Some(tone), Some(post_type)) = (tone, post_type) else {
        return Err(flatten(&errors));
    };
    if !errors.field_errors().is_empty() {
        return Err(flatten(&errors));
    }

    let optional = |key: &str| fields.get(key).map(String::from);

    Ok(PostContent {
        idea: optional(keys::IDEA),
        tone,
        category,
        post_type,
        title: submission.title,
        value_proposition: submission.value_proposition,
        problem_solution: submission.problem_solution,
        backstory: optional(keys::BACKSTORY),
        local_connection: optional(keys::LOCAL_CONNECTION),
        call_to_action: optional(keys::CALL_TO_ACTION),
        base_text: submission.base_text,
        image_url: optional(keys::IMAGE_URL),
        product_name: optional(keys::PRODUCT_NAME),
        price: optional(keys::PRICE),
        product_description: optional(keys::PRODUCT_DESCRIPTION),
    })
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn flatten(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
