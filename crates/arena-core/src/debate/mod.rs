//! Debate domain: transcript, session, and persisted record types.

pub mod message;
pub mod record;
pub mod repository;
pub mod session;

pub use message::{Author, Message};
pub use record::DebateRecord;
pub use repository::DebateRecordRepository;
pub use session::{DebateSession, Locale, Personality, Stance};
