//! Session-keyed transcript storage.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::conversation::errors::ConversationResult;
use crate::conversation::session::SessionId;
use crate::conversation::transcript::Transcript;

/// Storage seam for per-session transcripts.
///
/// The store only needs get/put of the whole transcript; callers that need
/// ordering guarantees serialize their own read-modify-write cycles.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the transcript for a session, if one exists.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    async fn get_transcript(&self, session: &SessionId) -> ConversationResult<Option<Transcript>>;

    /// Store the transcript for a session, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    async fn put_transcript(
        &self,
        session: &SessionId,
        transcript: Transcript,
    ) -> ConversationResult<()>;
}

/// In-memory session store backed by a concurrent map.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, Transcript>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Number of sessions currently held.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_transcript(&self, session: &SessionId) -> ConversationResult<Option<Transcript>> {
        Ok(self
            .sessions
            .get(session)
            .map(|entry| entry.value().clone()))
    }

    async fn put_transcript(
        &self,
        session: &SessionId,
        transcript: Transcript,
    ) -> ConversationResult<()> {
        self.sessions.insert(session.clone(), transcript);
        Ok(())
    }
}
