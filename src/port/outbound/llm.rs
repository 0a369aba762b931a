//! LLM completion port used by the relevance filter.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap a specific provider and handle authentication and
/// response parsing. They must be `Send + Sync` so the active and sold
/// sets can be filtered concurrently.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is
    /// malformed.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
