//! Completion provider seam

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A service that answers advisor questions.
///
/// The bot only ever talks to `dyn LLMProvider`, so tests can swap in a mock
/// and deployments can point at any backend.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send one request and wait for the whole answer
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}
