//! Advisor backend trait

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use super::AdvisorError;
use crate::types::ChatMessage;

/// Ordered sequence of text fragments from a streaming completion.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, AdvisorError>> + Send>>;

/// Unified interface to the generative-AI service.
///
/// Only the sequencing and error behavior is part of this crate's contract;
/// the service's internals are an external collaborator's concern.
#[async_trait]
pub trait AdvisorBackend: Send + Sync {
    /// Open a streaming completion for the given transcript.
    ///
    /// Chunks arrive in order; the transport delivers no interleaving, so
    /// consumers append without a reordering buffer.
    async fn stream_chat(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
    ) -> Result<ChunkStream, AdvisorError>;

    /// One-shot free-form text generation.
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, AdvisorError>;

    /// One-shot generation constrained to JSON, optionally schema-guided.
    ///
    /// Returns the raw response text; callers strip code fences and parse
    /// via [`super::parsing`].
    async fn generate_json(
        &self,
        system_instruction: &str,
        prompt: &str,
        schema: Option<serde_json::Value>,
    ) -> Result<String, AdvisorError>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}
