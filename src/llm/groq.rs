//! Groq chat completion provider.
//!
//! Sends one non-streaming request to an OpenAI-compatible
//! `/chat/completions` endpoint: the fixed system prompt followed by the
//! user's message, with the configured sampling parameters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ChatProvider;
use super::error::ChatError;
use crate::config::LlmConfig;
use crate::error::{AppError, Result};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// OpenAI-compatible chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model ID to use for completion.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature (0.0–2.0).
    pub temperature: f64,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Nucleus sampling threshold (0.0–1.0).
    pub top_p: f64,
    /// Always `false`: replies are returned whole.
    pub stream: bool,
}

/// A single message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message author (`system`, `user`, `assistant`).
    pub role: String,
    /// The content of the message.
    pub content: String,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// The subset of an OpenAI-compatible completion response we read.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// List of completion choices.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChoiceMessage,
}

/// Message body of a choice. `content` may be `null` upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text.
    #[serde(default)]
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Chat provider backed by the Groq (OpenAI-compatible) completion API.
pub struct GroqChatProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for GroqChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqChatProvider")
            .field("model", &self.config.model)
            .field("api_url", &self.config.api_url)
            .finish()
    }
}

impl GroqChatProvider {
    /// Create a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the HTTP client cannot be constructed.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Full URL of the completion endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        )
    }

    /// Build the request body for a single user message.
    pub fn build_request(&self, message: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_owned(),
                    content: self.config.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_owned(),
                    content: message.to_owned(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            stream: false,
        }
    }

    /// Map an HTTP error status to the appropriate [`ChatError`].
    fn map_http_error(status: reqwest::StatusCode, body: &str) -> ChatError {
        let message = extract_error_message(body);
        match status.as_u16() {
            401 | 403 => ChatError::Credential(format!(
                "upstream rejected credential (HTTP {}): {message}",
                status.as_u16()
            )),
            _ => ChatError::Upstream(format!("HTTP {}: {message}", status.as_u16())),
        }
    }
}

/// Extract an error message from an OpenAI-style error body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

/// Pull the first choice's text out of a raw response body.
fn first_completion(body: &str) -> std::result::Result<String, ChatError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::MalformedResponse(format!("invalid JSON: {e}")))?;
    parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::MalformedResponse("no choices in response".into()))?
        .message
        .content
        .ok_or_else(|| ChatError::MalformedResponse("first choice has no content".into()))
}

#[async_trait]
impl ChatProvider for GroqChatProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, message: &str) -> std::result::Result<String, ChatError> {
        if !self.config.has_api_key() {
            return Err(ChatError::Credential("no API key configured".into()));
        }

        let body = self.build_request(message);
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.trim())
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Upstream(format!("request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ChatError::Upstream(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(Self::map_http_error(status, &text));
        }

        first_completion(&text)
    }
}
