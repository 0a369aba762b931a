//! LLM relevance filter configuration.

use serde::Deserialize;

/// Settings for the OpenAI-compatible completion endpoint.
///
/// The API key is read from `GROQ_API_KEY`, never from the file.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Run the relevance filter at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Chat completions endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens in response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Extra relevance rules appended to the filter prompt.
    #[serde(default)]
    pub constraints: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(skip)]
    pub api_key: Option<String>,
}

const fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".into()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".into()
}

fn default_temperature() -> f64 {
    0.0
}

const fn default_max_tokens() -> usize {
    4096
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            constraints: None,
            timeout_ms: default_timeout_ms(),
            api_key: None,
        }
    }
}
