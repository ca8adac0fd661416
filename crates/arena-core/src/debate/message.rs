//! Transcript message types.
//!
//! A debate transcript is an ordered sequence of messages, each authored
//! either by the user or by the generated opponent. Insertion order defines
//! transcript order and is significant for prompt rendering and provenance.

use serde::{Deserialize, Serialize};

/// Who authored a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// Line written by the user.
    User,
    /// Line generated by the AI opponent.
    Opponent,
}

/// A single line in a debate transcript.
///
/// Messages are immutable once appended to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The author of this line.
    pub author: Author,
    /// The text content of this line.
    pub text: String,
}

impl Message {
    /// Creates a user-authored message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
        }
    }

    /// Creates an opponent-authored message.
    pub fn opponent(text: impl Into<String>) -> Self {
        Self {
            author: Author::Opponent,
            text: text.into(),
        }
    }
}
