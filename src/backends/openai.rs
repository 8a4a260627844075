//! OpenAI chat-completions client.
//!
//! The same wire format is served by self-hosted vLLM deployments, so one
//! client covers both backends; only the base URL, key and model differ.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse},
    error::EvalError,
};

/// Default base URL for the hosted OpenAI API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";
/// Default model for the hosted OpenAI API.
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4";

/// Configuration for the OpenAI-compatible client.
#[derive(Debug)]
pub struct OpenAIConfig {
    /// Name used in logs and error messages ("OpenAI", "vLLM").
    pub provider_name: String,
    /// API key for bearer authentication.
    pub api_key: SecretString,
    /// Base URL, with or without trailing slash.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate in responses.
    pub max_tokens: Option<u32>,
    /// Sampling temperature for response randomness.
    pub temperature: Option<f32>,
    /// System prompt to guide model behavior.
    pub system: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Client for OpenAI-compatible chat completion endpoints.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct OpenAI {
    pub config: Arc<OpenAIConfig>,
    pub client: Client,
}

#[derive(Serialize)]
struct OpenAIChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatChoice {
    message: OpenAIChatMsg,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatMsg {
    #[serde(default)]
    content: Option<String>,
}

impl std::fmt::Display for OpenAIChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "No response content"),
        }
    }
}

impl ChatResponse for OpenAIChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|content| !content.is_empty())
    }
}

impl OpenAI {
    /// Creates a client with its own `reqwest` client.
    pub fn new(config: OpenAIConfig) -> Result<Self, EvalError> {
        let mut builder = Client::builder();
        if let Some(sec) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        let client = builder
            .build()
            .map_err(|e| EvalError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, EvalError> {
        let system = self
            .config
            .system
            .as_deref()
            .map(|system| ChatMessage::system().content(system).build());
        let wire_msgs: Vec<OpenAIChatMessage> = system
            .iter()
            .chain(messages.iter())
            .map(|m| OpenAIChatMessage {
                role: m.role.as_str(),
                content: &m.content,
            })
            .collect();

        let body = OpenAIChatRequest {
            model: &self.config.model,
            messages: wire_msgs,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("{} request payload: {}", self.config.provider_name, json);
            }
        }

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        log::debug!("{} HTTP status: {}", self.config.provider_name, status);

        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(status_error(&self.config.provider_name, status, error_text));
        }

        let raw = resp.text().await?;
        let parsed: OpenAIChatResponse =
            serde_json::from_str(&raw).map_err(|e| EvalError::ResponseFormatError {
                message: format!("Failed to decode {} response: {e}", self.config.provider_name),
                raw_response: raw.clone(),
            })?;

        Ok(Box::new(parsed))
    }
}

fn status_error(provider: &str, status: StatusCode, body: String) -> EvalError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            EvalError::AuthError(format!("{provider} rejected credentials ({status}): {body}"))
        }
        _ => EvalError::ProviderError(format!("{provider} API returned {status}: {body}")),
    }
}
