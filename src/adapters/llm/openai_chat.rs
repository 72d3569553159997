//! OpenAI chat completion adapter.
//!
//! Calls `/v1/chat/completions` and returns the first choice.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{LlmConfig, OpenAiConfig};
use crate::domain::ports::chat_model::{ChatMessage, ChatModel, ChatRequest, ChatResponse};
use crate::infrastructure::openai::{OpenAiApiError, OpenAiHttpClient};

/// Chat model backed by the OpenAI API
pub struct OpenAiChatModel {
    config: LlmConfig,
    client: OpenAiHttpClient,
}

impl OpenAiChatModel {
    pub fn new(openai: &OpenAiConfig, config: LlmConfig) -> DomainResult<Self> {
        let client = OpenAiHttpClient::new(openai, config.timeout_secs).map_err(completion_error)?;
        Ok(Self { config, client })
    }

    /// Configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Configured sampling temperature
    pub fn temperature(&self) -> f32 {
        self.config.temperature
    }
}

fn completion_error(err: OpenAiApiError) -> DomainError {
    DomainError::CompletionFailed(err.to_string())
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    fn name(&self) -> &'static str {
        "openai"
    }

    #[instrument(skip(self, request), fields(model = %self.config.model, messages = request.messages.len()))]
    async fn complete(&self, request: ChatRequest) -> DomainResult<ChatResponse> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response: ChatCompletionResponse = self
            .client
            .post_json("chat/completions", &body)
            .await
            .map_err(completion_error)?;

        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion usage"
            );
        }

        let model = response.model.unwrap_or_else(|| self.config.model.clone());
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            DomainError::CompletionFailed("Chat completion returned no choices".to_string())
        })?;

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            model,
        })
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
