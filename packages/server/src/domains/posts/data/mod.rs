pub mod submission;
pub mod types;

pub use submission::validate_submission;
pub use types::{keys, ActionOutcome, ActionResult, FieldErrors, FormFields, PreviewSet};
