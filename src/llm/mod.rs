//! Text completion against an OpenAI-compatible chat completions endpoint

pub mod prompts;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::error;

use crate::config::LlmConfig;
use crate::errors::Result;
use crate::errors::ViaRagError;

pub use prompts::ChatPrompts;
pub use prompts::PromptTemplate;

/// Opaque `complete(prompt) -> text` capability.
///
/// An empty string means the provider answered without content.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Chat message sent to the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for the completion provider
#[derive(Clone)]
pub struct LlmService {
    endpoint: String,
    api_key: String,
    model: String,
    referer: String,
    title: String,
    client: Client,
}

impl LlmService {
    /// Create a new LLM service
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ViaRagError::HttpError(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key: config.resolved_api_key(),
            model: config.model.clone(),
            referer: config.referer.clone(),
            title: config.title.clone(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one user message and return the first choice's content
    ///
    /// # Errors
    /// - Network errors and timeouts
    /// - Non-success HTTP status (the raw body is logged)
    /// - Malformed response payload
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage::user(prompt)],
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }
        if !self.referer.is_empty() {
            builder = builder.header("HTTP-Referer", &self.referer);
        }
        if !self.title.is_empty() {
            builder = builder.header("X-Title", &self.title);
        }

        debug!("Calling completion endpoint {} with model {}", self.endpoint, self.model);
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Completion provider returned {}: {}", status, body);
            return Err(ViaRagError::LlmError(format!(
                "provider returned status {status}"
            )));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Malformed completion payload: {}", body);
            ViaRagError::LlmError(format!("malformed completion payload: {e}"))
        })?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl CompletionProvider for LlmService {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = ChatCompletionRequest {
            model: "openai/gpt-4o-mini",
            messages: vec![ChatMessage::user("hello")],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "openai/gpt-4o-mini",
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[test]
    fn test_response_without_choices_parses() {
        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn test_service_builds_from_default_config() {
        let config = LlmConfig {
            api_key: "test-key".to_string(),
            ..LlmConfig::default()
        };
        let service = LlmService::new(&config).unwrap();
        assert_eq!(service.model(), "openai/gpt-4o-mini");
    }
}
