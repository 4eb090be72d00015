//! Model provider boundary.
//!
//! `ChatModel` is the seam the summarization client talks to. The OpenAI
//! implementation does a single HTTP round trip; retries live in
//! `RetryingModel`, which wraps any other model.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Body of a chat-completions call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("transient model error: {0}")]
    Transient(String),

    #[error("model error: {0}")]
    Permanent(String),
}

impl ModelError {
    pub fn is_transient(&self) -> bool {
        matches!(self, ModelError::Transient(_))
    }

    /// The provider's message without the classification prefix.
    pub fn message(&self) -> &str {
        match self {
            ModelError::Transient(message) | ModelError::Permanent(message) => message,
        }
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends the conversation and returns the generated text.
    async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError>;
}

#[async_trait]
impl<M: ChatModel + ?Sized> ChatModel for Arc<M> {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError> {
        (**self).complete(request).await
    }
}

/// Statuses worth another attempt: timeouts, conflicts, throttling and
/// anything the provider reports as its own fault.
pub fn is_transient_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT | StatusCode::CONFLICT | StatusCode::TOO_MANY_REQUESTS
    ) || status.is_server_error()
}

/// OpenAI chat-completions client.
pub struct OpenAiChatModel {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiChatModel {
    /// The client has no request timeout; a call runs until the provider
    /// answers or the connection drops.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ModelError::Transient(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("OpenAI completion failed ({}): {}", status, body);
            return Err(if is_transient_status(status) {
                ModelError::Transient(message)
            } else {
                ModelError::Permanent(message)
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| {
                ModelError::Permanent(format!("Failed to parse OpenAI response: {}", e))
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ModelError::Permanent("No text in OpenAI response".to_string()))
    }
}

/// Retries transient failures of the wrapped model with exponential backoff.
///
/// Delays double from `base_delay`: 500ms, then 1s with the defaults.
pub struct RetryingModel<M> {
    inner: M,
    max_retries: u32,
    base_delay: Duration,
}

impl<M: ChatModel> RetryingModel<M> {
    pub fn new(inner: M, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            base_delay: Duration::from_millis(500),
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    // ExponentialBackoff yields base^n scaled by factor, so base 2 with
    // factor base_delay/2 gives base_delay, 2 * base_delay, ...
    fn backoff(&self) -> impl Iterator<Item = Duration> {
        let factor = self.base_delay.as_millis() as u64 / 2;
        ExponentialBackoff::from_millis(2)
            .factor(factor)
            .take(self.max_retries as usize)
    }
}

#[async_trait]
impl<M: ChatModel> ChatModel for RetryingModel<M> {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError> {
        let mut attempt = 0u32;

        RetryIf::spawn(
            self.backoff(),
            || self.inner.complete(request),
            |e: &ModelError| {
                attempt += 1;
                tracing::warn!(
                    "Model call failed (attempt {}/{}): {}",
                    attempt,
                    self.max_retries + 1,
                    e
                );
                e.is_transient()
            },
        )
        .await
    }
}
