//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::AgentConfig;
use crate::conversation::{ConversationManager, InMemorySessionStore};
use crate::llm::{CompletionProvider, OpenAiChat};

/// Shared application state.
pub struct AppState {
    /// Conversation manager driving all sessions.
    pub manager: ConversationManager,
}

impl AppState {
    /// Create application state with the real completion client wired from
    /// the environment.
    ///
    /// # Errors
    /// Returns an error if the completion client cannot be created.
    pub fn new(config: &AgentConfig) -> Result<Arc<Self>, Box<dyn std::error::Error + Send + Sync>> {
        let provider = OpenAiChat::from_env(config.provider.clone())
            .map_err(|e| format!("Failed to create completion client: {e}"))?;

        Ok(Self::with_provider(Arc::new(provider), config))
    }

    /// Create application state around an injected completion provider.
    #[must_use]
    pub fn with_provider(provider: Arc<dyn CompletionProvider>, config: &AgentConfig) -> Arc<Self> {
        let store = Arc::new(InMemorySessionStore::new());
        let manager = ConversationManager::new(store, provider, config.conversation.clone());

        Arc::new(Self { manager })
    }
}
