//! Generative-service interaction layer for Debate Arena.
//!
//! Holds everything that faces the external text service: the
//! [`generation::GenerativeAgent`] seam and its Gemini REST implementation,
//! the [`prompts::PromptComposer`] template table, and the strict output
//! schemas for structured generation.

pub mod generation;
pub mod prompts;
pub mod schemas;

pub use generation::{GeminiClient, GenerativeAgent};
pub use prompts::{PromptComposer, PromptContext, PromptKind};
