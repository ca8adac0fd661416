//! Debate session domain model.
//!
//! A [`DebateSession`] is the in-memory snapshot of one exchange: the topic,
//! which side the user defends, the locale the exchange is held in, an
//! optional opponent personality, and the ordered transcript. It is created
//! at session start, mutated only by appending messages, and discarded once
//! a report has been produced (the persisted subset lives in
//! [`super::record::DebateRecord`]).

use super::message::{Author, Message};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// The side the user defends on the selected topic.
///
/// The opponent always argues the opposite side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Stance {
    For,
    Against,
}

impl Stance {
    /// The side the opponent argues.
    pub fn opposite(self) -> Self {
        match self {
            Stance::For => Stance::Against,
            Stance::Against => Stance::For,
        }
    }
}

/// Supported exchange locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    Tr,
    En,
}

impl Locale {
    /// Short locale code, used as the template-table key prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        }
    }

    /// The fixed role-label pair used when rendering transcript lines,
    /// as `(user_label, opponent_label)`.
    pub fn role_labels(self) -> (&'static str, &'static str) {
        match self {
            Locale::Tr => ("Kullanıcı", "Münazır"),
            Locale::En => ("User", "AI Debater"),
        }
    }
}

/// Optional debating personality for the generated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Personality {
    Calm,
    Aggressive,
    Academic,
}

impl Personality {
    /// A short instruction snippet describing the personality, injected
    /// into the turn prompt when a personality is selected.
    pub fn description(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Personality::Calm, Locale::En) => {
                "Keep a calm, patient and encouraging tone throughout."
            }
            (Personality::Calm, Locale::Tr) => {
                "Sakin, sabırlı ve teşvik edici bir üslup kullan."
            }
            (Personality::Aggressive, Locale::En) => {
                "Debate assertively, press weak points hard, concede nothing easily."
            }
            (Personality::Aggressive, Locale::Tr) => {
                "Iddialı münazara et, zayıf noktaların üzerine git, kolay taviz verme."
            }
            (Personality::Academic, Locale::En) => {
                "Argue in a formal, academic register, citing general knowledge precisely."
            }
            (Personality::Academic, Locale::Tr) => {
                "Resmi, akademik bir üslupla tartış, genel bilgiye titizlikle atıf yap."
            }
        }
    }
}

/// Immutable snapshot of one debate session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateSession {
    /// The debate topic, verbatim as the user selected it.
    pub topic: String,
    /// The side the user defends.
    pub stance: Stance,
    /// Locale of the exchange; selects templates and role labels.
    pub locale: Locale,
    /// Optional opponent personality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<Personality>,
    /// Ordered transcript. Insertion order is transcript order.
    pub messages: Vec<Message>,
}

impl DebateSession {
    /// Creates a new session with an empty transcript.
    pub fn new(topic: impl Into<String>, stance: Stance, locale: Locale) -> Self {
        Self {
            topic: topic.into(),
            stance,
            locale,
            personality: None,
            messages: Vec::new(),
        }
    }

    /// Sets the opponent personality.
    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = Some(personality);
        self
    }

    /// Appends a message to the transcript.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns the user-authored lines, in transcript order.
    ///
    /// This is the corpus the provenance check runs against; opponent lines
    /// are deliberately excluded.
    pub fn user_sentences(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.author == Author::User)
            .map(|m| m.text.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_sentences_excludes_opponent_lines() {
        let mut session = DebateSession::new("nuclear energy", Stance::For, Locale::En);
        session.append(Message::user("I think it is safe"));
        session.append(Message::opponent("Consider waste disposal"));
        session.append(Message::user("Modern reactors handle waste"));

        assert_eq!(
            session.user_sentences(),
            vec!["I think it is safe", "Modern reactors handle waste"]
        );
    }

    #[test]
    fn test_stance_opposite() {
        assert_eq!(Stance::For.opposite(), Stance::Against);
        assert_eq!(Stance::Against.opposite(), Stance::For);
    }

    #[test]
    fn test_stance_displays_lowercase() {
        assert_eq!(Stance::For.to_string(), "for");
        assert_eq!(Stance::Against.to_string(), "against");
    }

    #[test]
    fn test_role_labels_per_locale() {
        assert_eq!(Locale::En.role_labels(), ("User", "AI Debater"));
        assert_eq!(Locale::Tr.role_labels().0, "Kullanıcı");
    }
}
