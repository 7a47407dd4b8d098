//! Pure OpenAI REST API client
//!
//! A small client for schema-constrained structured output over the chat
//! completions endpoint, with no domain logic.
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct Caption {
//!     content: String,
//! }
//!
//! let client = OpenAIClient::new(api_key);
//! let request = StructuredRequest::new(
//!     "gpt-4o",
//!     system_prompt,
//!     user_prompt,
//!     &Caption::type_name(),
//!     Caption::openai_schema(),
//! );
//! let json = client.structured_output(request).await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{OpenAIError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use reqwest::{header, Client, Response};
use serde::Serialize;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for Azure, proxies, local mocks).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Structured output with JSON schema.
    ///
    /// Returns the raw JSON text of the first choice.
    pub async fn structured_output(&self, request: StructuredRequest) -> Result<String> {
        let start = std::time::Instant::now();

        let response = self.post_chat(&request).await?;
        let raw: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        let content = first_content(raw)?;

        debug!(
            model = %request.model,
            schema = %request.response_format.json_schema.name,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI structured output"
        );

        Ok(content)
    }

    async fn post_chat<B: Serialize>(&self, body: &B) -> Result<Response> {
        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        Ok(response)
    }
}

fn first_content(raw: types::ChatResponseRaw) -> Result<String> {
    let message = raw
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| OpenAIError::Parse("No choices in OpenAI response".into()))?;

    if let Some(refusal) = message.refusal {
        return Err(OpenAIError::Refusal(refusal));
    }

    message
        .content
        .ok_or_else(|| OpenAIError::Parse("OpenAI response had no content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Caption {
        content: String,
    }

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    fn caption_request() -> StructuredRequest {
        StructuredRequest::new(
            "gpt-4o",
            "system",
            "user",
            &Caption::type_name(),
            Caption::openai_schema(),
        )
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = OpenAIClient::new("sk-test").with_base_url("https://custom.api.com/v1/");

        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.base_url, "https://custom.api.com/v1");
    }

    #[tokio::test]
    async fn test_structured_output_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o",
                "response_format": {"type": "json_schema", "json_schema": {"name": "Caption"}}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(r#"{"content": "Fresh bread daily"}"#))
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let json = client.structured_output(caption_request()).await.unwrap();

        let caption: Caption = serde_json::from_str(&json).unwrap();
        assert_eq!(caption.content, "Fresh bread daily");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_carries_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let err = client.structured_output(caption_request()).await.unwrap_err();

        assert!(
            matches!(err, OpenAIError::Api { status: 429, ref message } if message == "rate limited"),
            "got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_missing_choices_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let err = client.structured_output(caption_request()).await.unwrap_err();

        assert!(matches!(err, OpenAIError::Parse(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_refusal_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": null, "refusal": "No."}}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let err = client.structured_output(caption_request()).await.unwrap_err();

        assert!(matches!(err, OpenAIError::Refusal(ref r) if r == "No."));
    }
}
