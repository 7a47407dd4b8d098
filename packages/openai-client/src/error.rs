//! Error types for the OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Connection failed before a response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The model declined to produce structured output
    #[error("Model refused the request: {0}")]
    Refusal(String),

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}
