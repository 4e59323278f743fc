//! Session manager driving transcripts through a completion provider.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::ConversationConfig;
use crate::conversation::errors::{ConversationError, ConversationResult};
use crate::conversation::message::Message;
use crate::conversation::session::SessionId;
use crate::conversation::store::SessionStore;
use crate::conversation::transcript::Transcript;
use crate::llm::CompletionProvider;

/// Reply substituted when the completion provider fails.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble responding right now. Please try again.";

/// Orchestrates per-session transcripts and provider calls.
///
/// The backing store only offers get/put, so every read-modify-write cycle
/// is serialized through a per-session mutex; concurrent requests on the
/// same session run one at a time.
pub struct ConversationManager {
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn CompletionProvider>,
    config: ConversationConfig,
    locks: DashMap<SessionId, Arc<Mutex<()>>>,
}

impl ConversationManager {
    /// Create a manager over the given store and provider.
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn CompletionProvider>,
        config: ConversationConfig,
    ) -> Self {
        Self {
            store,
            provider,
            config,
            locks: DashMap::new(),
        }
    }

    /// Load the transcript for a session, creating it on first use.
    ///
    /// # Errors
    /// Returns an error if the session store is inaccessible.
    pub async fn transcript(&self, session: &SessionId) -> ConversationResult<Transcript> {
        let lock = self.session_lock(session);
        let _guard = lock.lock().await;

        self.load_or_create(session).await
    }

    /// Run one ask turn: validate, record the user message, obtain a reply,
    /// record it, and enforce retention.
    ///
    /// A provider failure is absorbed into [`FALLBACK_REPLY`]; the turn still
    /// completes and the transcript still grows by two entries.
    ///
    /// # Errors
    /// Returns [`ConversationError::EmptyPrompt`] for an empty prompt (the
    /// transcript is left untouched) and a store error if the session store
    /// is inaccessible.
    pub async fn ask(&self, session: &SessionId, prompt: &str) -> ConversationResult<String> {
        if prompt.trim().is_empty() {
            return Err(ConversationError::EmptyPrompt);
        }

        let lock = self.session_lock(session);
        let _guard = lock.lock().await;

        let mut transcript = self.load_or_create(session).await?;
        transcript.push(Message::user(prompt));

        let reply = match self.provider.complete(transcript.entries()).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(session = %session, "completion provider failed: {err}");
                FALLBACK_REPLY.to_owned()
            }
        };

        transcript.push(Message::assistant(reply.clone()));
        transcript.enforce_retention(self.config.max_entries);
        self.store.put_transcript(session, transcript).await?;

        Ok(reply)
    }

    /// Reset a session to its single-system-message initial state.
    ///
    /// Idempotent: clearing a fresh or already-cleared session is a no-op.
    ///
    /// # Errors
    /// Returns an error if the session store is inaccessible.
    pub async fn clear(&self, session: &SessionId) -> ConversationResult<()> {
        let lock = self.session_lock(session);
        let _guard = lock.lock().await;

        let mut transcript = self.load_or_create(session).await?;
        transcript.reset();
        self.store.put_transcript(session, transcript).await
    }

    async fn load_or_create(&self, session: &SessionId) -> ConversationResult<Transcript> {
        if let Some(transcript) = self.store.get_transcript(session).await? {
            return Ok(transcript);
        }

        debug!(session = %session, "initializing transcript");
        let transcript = Transcript::with_system(self.config.system_prompt.clone());
        self.store
            .put_transcript(session, transcript.clone())
            .await?;
        Ok(transcript)
    }

    fn session_lock(&self, session: &SessionId) -> Arc<Mutex<()>> {
        self.locks
            .entry(session.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
