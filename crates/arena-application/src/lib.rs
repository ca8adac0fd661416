//! Application layer for Debate Arena.
//!
//! Wires the interaction layer, the pure pipeline stages and the
//! persistence boundary into the caller-facing operations: running a turn,
//! finalizing a session into artifacts, building a longitudinal profile,
//! and classifying quiz scores.

pub mod debate_usecase;

pub use debate_usecase::{DebateUseCase, DiagramOutcome, SessionOutcome, placeholder_reply};
