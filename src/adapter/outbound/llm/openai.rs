//! OpenAI-compatible chat completions client.
//!
//! Works against any endpoint speaking the OpenAI chat completions wire
//! format with JSON-object responses; Groq is the default.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app::LlmConfig;
use crate::error::{ConfigError, Error, Result};
use crate::port::outbound::llm::Llm;

/// OpenAI-compatible client.
pub struct OpenAiCompatible {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f64,
}

impl OpenAiCompatible {
    /// Create a new client.
    #[must_use]
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f64,
    ) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
        }
    }

    /// Create from configuration; the key must already be loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when `GROQ_API_KEY` is unset.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or(ConfigError::MissingField {
            field: "GROQ_API_KEY",
        })?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                Client::new()
            });

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn request(&self, prompt: &str) -> Request {
        Request {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Request {
    model: String,
    max_tokens: usize,
    temperature: f64,
    response_format: ResponseFormat,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Llm for OpenAiCompatible {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.request(prompt))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<Response>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::Parse("completion response had no content".into()))
    }
}
