//! Chat-completion client for the text-generation service.
//!
//! Every call is a single blocking round trip: one user-role message in, the first
//! choice's message content out. There is no retry. A failed or timed out call is
//! reported once as a [`ModelError`] and the caller decides what that means.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request to model service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("response contained no message content")]
    MissingContent,

    #[error("failed to build model client: {0}")]
    Client(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Sends one prompt to the text-generation service and returns the reply text.
///
/// With `strip_fence` set, a reply wrapped in a code fence is unwrapped so callers
/// that expect JSON see the bare payload.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn invoke(&self, prompt: &str, strip_fence: bool) -> ModelResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatRequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatEnvelope {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

/// OpenAI-compatible `chat/completions` client with bearer authentication.
pub struct OpenAiModelClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: SecretString,
}

impl OpenAiModelClient {
    pub fn new(config: &Config) -> ModelResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.model_timeout())
            .connect_timeout(config.model_connect_timeout())
            .build()
            .map_err(|e| ModelError::Client(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/chat/completions",
                config.openai_api_base.trim_end_matches('/')
            ),
            model: config.openai_model.clone(),
            api_key: config.openai_api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ModelClient for OpenAiModelClient {
    async fn invoke(&self, prompt: &str, strip_fence: bool) -> ModelResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatRequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        log::debug!(
            "Calling {} with model {} ({} prompt chars)",
            self.endpoint,
            self.model,
            prompt.chars().count()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content = extract_content(&body)?;
        if strip_fence {
            Ok(strip_code_fence(&content))
        } else {
            Ok(content)
        }
    }
}

/// Pulls `choices[0].message.content` out of a chat-completion response body.
fn extract_content(body: &str) -> ModelResult<String> {
    let envelope: ChatEnvelope = serde_json::from_str(body)?;

    envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ModelError::MissingContent)
}

/// Removes a surrounding code fence from a model reply.
///
/// The opening marker is any run of three or more backticks, optionally followed by
/// an info string (`json`, `JSON`, ...) on the same line. The reply is only unwrapped
/// when it also ends with the identical marker; anything else comes back unchanged.
pub fn strip_code_fence(content: &str) -> String {
    let trimmed = content.trim();
    let marker_len = trimmed.chars().take_while(|c| *c == '`').count();
    if marker_len < 3 {
        return content.to_string();
    }

    // Backticks are ASCII, so the char count is also the byte offset.
    let (marker, rest) = trimmed.split_at(marker_len);
    let inner = match rest.strip_suffix(marker) {
        Some(inner) if !inner.ends_with('`') => inner,
        _ => return content.to_string(),
    };

    let body = match inner.split_once('\n') {
        Some((first, rest)) if is_info_string(first) => rest,
        Some(_) => inner,
        None => strip_inline_info(inner),
    };

    body.trim().to_string()
}

/// Language tag after an opening marker: empty, or one word such as `json`.
fn is_info_string(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '.'))
}

/// Single-line fences only drop a tag that is followed by a JSON payload.
fn strip_inline_info(inner: &str) -> &str {
    match inner.trim_start().split_once(char::is_whitespace) {
        Some((tag, rest)) if is_info_string(tag) && rest.trim_start().starts_with(['[', '{']) => rest,
        _ => inner,
    }
}
