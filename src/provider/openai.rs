use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::errors::GenerateError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// OpenAI chat-completions provider. Sampling is pinned (temperature 0,
/// top_p 1, fixed seed) and the response is constrained to a single JSON
/// object, so repeated runs against identical input stay as reproducible as
/// the endpoint allows. No request timeout is set; the call relies on the
/// client's default.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.into(),
            client: Client::new(),
        }
    }

    /// Point the provider at a different endpoint. Used by tests to talk to a
    /// local stub server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl super::ChatProvider for OpenAiProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String, GenerateError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": 0.0,
            "top_p": 1.0,
            "seed": 42,
            "response_format": { "type": "json_object" }
        });

        tracing::debug!(model = %self.model, "sending chat completion request");

        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Generation(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GenerateError::Generation(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerateError::Generation(format!(
                "chat completion endpoint returned {status}: {text}"
            )));
        }

        // Minimal structs for the slice of the chat response we care about.
        #[derive(Deserialize)]
        struct ChatMessage {
            content: Option<String>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChatMessage,
        }
        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            GenerateError::Generation(format!("unexpected chat completion response: {e}"))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        tracing::debug!(bytes = content.len(), "received chat completion content");

        Ok(content)
    }
}
