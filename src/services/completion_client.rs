use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::{config::Config, errors::CompletionError};

/// Turns a prompt into free text. Implementations make exactly one upstream
/// call per invocation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Chat-completion client for any provider with an OpenAI-compatible API.
/// The default configuration targets Gemini.
pub struct OpenAiCompletionClient {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiCompletionClient {
    pub fn from_config(config: &Config) -> Self {
        let client = config.api_key.as_ref().map(|key| {
            let openai_config = OpenAIConfig::new()
                .with_api_base(config.completion_api_base.as_str())
                .with_api_key(key.expose_secret());
            Client::with_config(openai_config)
        });

        Self {
            client,
            model: config.completion_model.clone(),
        }
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let client = self
            .client
            .as_ref()
            .ok_or(CompletionError::MissingCredential)?;

        log::info!(
            "Requesting completion from model '{}' ({} prompt chars)",
            self.model,
            prompt.chars().count()
        );

        let response: Value = client
            .chat()
            .create_byot(self.request_body(prompt))
            .await
            .map_err(|e| {
                log::error!("Completion request to '{}' failed: {}", self.model, e);
                CompletionError::Request(e.to_string())
            })?;

        message_content(&response)
    }
}

/// Text of the first choice of a chat-completion response body.
pub fn message_content(response: &Value) -> Result<String, CompletionError> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .ok_or(CompletionError::EmptyResponse)
}
