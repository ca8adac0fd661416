//! Validated artifact types.
//!
//! These are the structured forms the pipeline distills out of free-form
//! generated text. Their wire form is camelCase JSON, matching the shape the
//! generative service is instructed to produce.

use serde::{Deserialize, Serialize};

/// The weakest point identified in the user's argumentation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakPoint {
    /// Name of the most prominent logical fallacy (e.g. "Straw Man").
    #[serde(default)]
    pub fallacy_type: String,
    /// One-sentence definition of that fallacy.
    #[serde(default)]
    pub fallacy_definition: String,
    /// The user sentence that exemplifies the fallacy. Subject to the
    /// provenance contract before a record is considered valid.
    #[serde(default)]
    pub quoted_sentence: String,
    /// Concrete advice on how to strengthen the argument.
    #[serde(default)]
    pub improvement_advice: String,
}

/// A performance report over one finished debate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Summary of the user's strongest argument.
    pub strongest_argument: String,
    /// The identified weak point.
    pub weak_point: WeakPoint,
    /// Assessment of how well claims were backed by evidence.
    #[serde(default)]
    pub evidence_usage: String,
    /// Overall persuasiveness, 1-10.
    pub persuasiveness_score: u8,
    /// Short closing comment from the coach.
    #[serde(default)]
    pub overall_comment: String,
}

/// Diagram source describing the argument flow of a debate.
///
/// When `source_text` is non-empty it starts with a recognized diagram-start
/// token and has balanced bracket/quote pairs; the structural validator is
/// the only producer of non-empty values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramArtifact {
    /// The diagram source, e.g. Mermaid `graph TD` text.
    pub source_text: String,
}

impl DiagramArtifact {
    /// The neutral artifact persisted when a diagram was degraded to a
    /// diagnostic instead of validated.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether any diagram source is present.
    pub fn is_empty(&self) -> bool {
        self.source_text.is_empty()
    }
}

/// A synthesized longitudinal skill profile.
///
/// Recomputed on demand from a user's full record history; never mutated
/// in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// The user's most frequent fallacy category.
    #[serde(default)]
    pub dominant_fallacy: String,
    /// Advice specific to that fallacy.
    #[serde(default)]
    pub advice_for_fallacy: String,
    /// Characterization of the user's debating style.
    #[serde(default)]
    pub style: String,
    /// The user's strongest skill.
    #[serde(default)]
    pub strength: String,
    /// The area with the most room to grow.
    #[serde(default)]
    pub growth_area: String,
}
