//! Error types for the conversation subsystem.

use thiserror::Error;

/// Conversation subsystem error type.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// The caller supplied an empty or absent prompt.
    #[error("prompt is required")]
    EmptyPrompt,
    /// The session store could not be read or written.
    #[error("session store error: {0}")]
    Store(String),
}

/// Convenience result alias for conversation operations.
pub type ConversationResult<T> = Result<T, ConversationError>;
