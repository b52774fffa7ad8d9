//! LLM client: the single point of entry for all chat-completion calls.
//!
//! No other module talks to the upstream API directly; the chat pipeline
//! depends only on the `ChatCompletion` trait so tests can script answers.
//!
//! One request per call. No retries: a failure is reported to the caller,
//! which maps it to a generic HTTP 500.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OPENROUTER_API_KEY not set")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed chat completion response: {0}")]
    MalformedResponse(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
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

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// The subset of a chat-completion response we read.
///
/// Absent fields and explicit `null`s are kept apart: a missing `choices`
/// list or `message` object is tolerated, a `null` one is malformed.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default, deserialize_with = "present")]
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    /// `None`: field absent. `Some(None)`: explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub message: Option<Option<ChoiceMessage>>,
    /// Legacy completion-style payloads put the answer here.
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// Wraps any present value, `null` included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ChatCompletionResponse {
    /// Answer text of the first choice: `message.content`, then `text`, then
    /// the empty string. Empty values fall through like missing ones.
    ///
    /// A missing `choices` list counts as one empty choice. An empty list or
    /// a `null` message is an error.
    pub fn answer_text(&self) -> Result<String, LlmError> {
        let default_choice = Choice::default();
        let choice = match &self.choices {
            None => &default_choice,
            Some(choices) => choices
                .first()
                .ok_or(LlmError::MalformedResponse("empty choices list"))?,
        };

        let content = match &choice.message {
            None => None,
            Some(None) => return Err(LlmError::MalformedResponse("null message")),
            Some(Some(message)) => message.content.as_deref(),
        };

        Ok(content
            .filter(|s| !s.is_empty())
            .or_else(|| choice.text.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or_default()
            .to_string())
    }
}

/// A chat-completion backend.
///
/// Carried in `AppState` as `Arc<dyn ChatCompletion>`.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Whether an API key is available. Checked before any request work.
    fn has_credentials(&self) -> bool;

    async fn complete(&self, messages: &[ChatMessage])
        -> Result<ChatCompletionResponse, LlmError>;
}

/// OpenRouter (or any OpenAI-compatible) chat-completion client.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    url: String,
    referer: String,
    title: String,
}

impl std::fmt::Debug for OpenRouterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("url", &self.url)
            .finish()
    }
}

impl OpenRouterClient {
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key: config.openrouter_api_key.clone(),
            model: config.openrouter_model.clone(),
            url: config.openrouter_url.clone(),
            referer: config.app_url.clone(),
            title: config.app_title.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatCompletion for OpenRouterClient {
    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatCompletionResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Chat completion API returned {status}: {body}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        debug!(
            model = %self.model,
            choices = completion.choices.as_ref().map_or(0, Vec::len),
            "Chat completion succeeded"
        );
        Ok(completion)
    }
}
