//! Session identifiers supplied by callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors returned when validating a [`SessionId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionIdError {
    /// Empty (or whitespace-only) token.
    #[error("session id must not be empty")]
    Empty,
    /// Exceeds the maximum accepted length.
    #[error("session id too long: got {got}, max {max}")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length received.
        got: usize,
    },
    /// Contains a disallowed character.
    #[error("session id contains invalid character {ch:?} at index {index}")]
    InvalidChar {
        /// The invalid character.
        ch: char,
        /// The index where it was found.
        index: usize,
    },
}

/// Caller-scoped session token owning exactly one transcript.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Hard ceiling to prevent pathological tokens.
    pub const MAX_LEN: usize = 128;

    /// Token backing the shared session for callers without one.
    const ANONYMOUS: &'static str = "anonymous";

    /// Build a validated session id.
    ///
    /// Rules:
    /// - Non-empty after trimming.
    /// - Max length limited.
    /// - Conservative ASCII set: `[A-Za-z0-9._:-]`.
    ///
    /// # Errors
    /// Returns `SessionIdError` if the token is empty, too long, or contains
    /// invalid characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SessionIdError> {
        let s = raw.as_ref().trim();

        if s.is_empty() {
            return Err(SessionIdError::Empty);
        }
        if s.len() > Self::MAX_LEN {
            return Err(SessionIdError::TooLong {
                max: Self::MAX_LEN,
                got: s.len(),
            });
        }

        for (i, ch) in s.chars().enumerate() {
            let ok = ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | ':' | '-');
            if !ok {
                return Err(SessionIdError::InvalidChar { ch, index: i });
            }
        }

        Ok(Self(s.to_owned()))
    }

    /// Shared session for callers that send no token.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_owned())
    }

    /// Borrow as `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionId {
    type Err = SessionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_conservative_tokens() {
        assert!(SessionId::new("user-42.browser_1:tab").is_ok());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let id = SessionId::new("  abc  ");
        assert_eq!(id.map(|id| id.as_str().to_owned()), Ok("abc".to_owned()));
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(SessionId::new(""), Err(SessionIdError::Empty));
        assert_eq!(SessionId::new("   "), Err(SessionIdError::Empty));
    }

    #[test]
    fn rejects_disallowed_characters() {
        assert!(matches!(
            SessionId::new("a b"),
            Err(SessionIdError::InvalidChar { ch: ' ', index: 1 })
        ));
    }

    #[test]
    fn rejects_oversized_tokens() {
        let long = "x".repeat(SessionId::MAX_LEN + 1);
        assert!(matches!(
            SessionId::new(long),
            Err(SessionIdError::TooLong { .. })
        ));
    }
}
