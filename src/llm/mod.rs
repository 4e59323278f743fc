//! Completion providers that turn a transcript into a single reply.

pub mod openai_chat;

pub use openai_chat::OpenAiChat;

use async_trait::async_trait;
use thiserror::Error;

use crate::conversation::message::Message;

/// Errors produced by completion providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level HTTP failure (connect, timeout, decode).
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    /// Provider returned a non-success status.
    #[error("provider http status not ok: {0}")]
    Status(u16),
    /// Provider payload did not contain a usable reply.
    #[error("provider response malformed")]
    MalformedResponse,
    /// API key environment variable is missing or empty.
    #[error("missing api key: set {0}")]
    MissingApiKey(&'static str),
}

/// Convenience result alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Maps an ordered transcript to a single generated reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a reply from the full ordered transcript.
    ///
    /// # Errors
    /// Returns an error when no reply can be produced; callers decide
    /// whether to surface or absorb the failure.
    async fn complete(&self, transcript: &[Message]) -> ProviderResult<String>;
}
