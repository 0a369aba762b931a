//! Mock LLMs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;

/// Returns a fixed response and counts calls.
pub struct MockLlm {
    response: String,
    calls: AtomicUsize,
}

impl MockLlm {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Always fails, as a timed-out provider would.
pub struct FailingLlm;

#[async_trait]
impl Llm for FailingLlm {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(Error::Connection("llm timed out".into()))
    }
}
