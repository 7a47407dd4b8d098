// BaseAI implementation on top of the openai-client crate.
//
// The model is fixed per generator; domain code never picks one.

use anyhow::Result;
use openai_client::{truncate_to_char_boundary, OpenAIClient, StructuredRequest};
use std::sync::Arc;

use super::BaseAI;

/// Structured-output generator bound to one model.
#[derive(Clone)]
pub struct OpenAIGenerator {
    client: Arc<OpenAIClient>,
    model: String,
}

impl OpenAIGenerator {
    pub fn new(client: Arc<OpenAIClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait::async_trait]
impl BaseAI for OpenAIGenerator {
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<String> {
        tracing::debug!(
            model = %self.model,
            schema = schema_name,
            prompt_preview = %truncate_to_char_boundary(user_prompt, 200),
            "Calling OpenAI for structured output"
        );

        let request =
            StructuredRequest::new(&self.model, system_prompt, user_prompt, schema_name, schema);

        let content = self.client.structured_output(request).await.map_err(|e| {
            tracing::error!(error = %e, model = %self.model, "OpenAI structured output failed");
            anyhow::anyhow!("{}", e)
        })?;

        tracing::info!(
            model = %self.model,
            response_length = content.len(),
            "OpenAI response received"
        );

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generator_sends_its_model_and_schema() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o-mini",
                "response_format": {"json_schema": {"name": "ContentOutput"}}
            })))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "choices": [{"message": {"content": "{\"content\":\"ok\"}"}}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = Arc::new(OpenAIClient::new("sk-test").with_base_url(server.url()));
        let generator = OpenAIGenerator::new(client, "gpt-4o-mini");

        let raw = generator
            .generate_structured(
                "system",
                "user",
                "ContentOutput",
                serde_json::json!({"type": "object"}),
            )
            .await
            .unwrap();

        assert_eq!(raw, r#"{"content":"ok"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generator_surfaces_api_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let client = Arc::new(OpenAIClient::new("sk-test").with_base_url(server.url()));
        let generator = OpenAIGenerator::new(client, "gpt-4o");

        let result = generator
            .generate_structured("s", "u", "DraftOutput", serde_json::json!({}))
            .await;
        assert!(result.is_err());
    }
}
