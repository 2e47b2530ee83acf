//! OpenAI-compatible chat-completions client
//!
//! Both chat surfaces talk to providers that speak the same wire format
//! (`POST {model, messages, ...}` answered with `choices[0].message.content`),
//! so one client serves both; only the endpoint, key and extra headers differ.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Where to send a completion and how to authenticate
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub url: String,
    pub api_key: String,
    pub headers: Vec<(String, String)>,
}

/// Request body
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub max_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider rejected the API key ({0})")]
    Unauthorized(u16),

    #[error("Provider rate limit exceeded")]
    RateLimited,

    #[error("Provider error {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider returned no completion")]
    EmptyResponse,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Shared HTTP client for chat completions
#[derive(Clone)]
pub struct ChatCompletionClient {
    http: reqwest::Client,
}

impl ChatCompletionClient {
    pub fn new() -> Result<Self, LlmError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http })
    }

    /// Send one completion request and return the first choice's text
    pub async fn complete(
        &self,
        endpoint: &Endpoint,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        let mut builder = self
            .http
            .post(&endpoint.url)
            .bearer_auth(&endpoint.api_key)
            .json(request);
        for (name, value) in &endpoint.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Unauthorized(status.as_u16()),
                429 => LlmError::RateLimited,
                code => LlmError::Provider { status: code, body },
            });
        }

        let parsed: CompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}
