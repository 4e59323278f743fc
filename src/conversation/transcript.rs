//! Ordered per-session transcripts with a pinned system entry.

use serde::{Deserialize, Serialize};

use crate::conversation::message::Message;

/// Ordered conversation history for one session.
///
/// Entry 0 is always the system message; it survives both retention and
/// reset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<Message>,
}

impl Transcript {
    /// Create a transcript seeded with the system message.
    #[must_use]
    pub fn with_system(system_prompt: impl Into<String>) -> Self {
        Self {
            entries: vec![Message::system(system_prompt)],
        }
    }

    /// Append a message at the end.
    pub fn push(&mut self, message: Message) {
        self.entries.push(message);
    }

    /// All entries in chronological order.
    #[must_use]
    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    /// Number of entries, system message included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the transcript holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The pinned system entry.
    #[must_use]
    pub fn system(&self) -> Option<&Message> {
        self.entries.first()
    }

    /// Drop the oldest history beyond `max_entries`, keeping the system entry
    /// and the most recent `max_entries - 1` entries in original order.
    pub fn enforce_retention(&mut self, max_entries: usize) {
        if max_entries == 0 || self.entries.len() <= max_entries {
            return;
        }

        let tail_start = self.entries.len() - (max_entries - 1);
        let tail = self.entries.split_off(tail_start);
        self.entries.truncate(1);
        self.entries.extend(tail);
    }

    /// Reset to the single-system-message initial state.
    pub fn reset(&mut self) {
        self.entries.truncate(1);
    }
}
