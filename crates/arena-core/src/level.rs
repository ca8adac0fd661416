//! Proficiency level classification.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// The five ordered proficiency levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Entry,
    Mid,
    Senior,
    Master,
}

/// Maps an assessment score to a proficiency level.
///
/// Thresholds are inclusive lower bounds evaluated highest first; every
/// score maps to exactly one level. Pure and side-effect-free.
pub fn classify(score: u32) -> SkillLevel {
    match score {
        s if s >= 9 => SkillLevel::Master,
        s if s >= 7 => SkillLevel::Senior,
        s if s >= 5 => SkillLevel::Mid,
        s if s >= 3 => SkillLevel::Entry,
        _ => SkillLevel::Beginner,
    }
}

/// One quiz submission with its derived level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAssessment {
    /// The learning topic the quiz belongs to.
    pub topic_id: String,
    /// Raw quiz score.
    pub score: u32,
    /// Level derived from the score; never set directly by a caller.
    pub level: SkillLevel,
}

impl QuizAssessment {
    /// Creates an assessment, deriving the level from the score.
    pub fn new(topic_id: impl Into<String>, score: u32) -> Self {
        Self {
            topic_id: topic_id.into(),
            score,
            level: classify(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_table() {
        assert_eq!(classify(9), SkillLevel::Master);
        assert_eq!(classify(8), SkillLevel::Senior);
        assert_eq!(classify(7), SkillLevel::Senior);
        assert_eq!(classify(6), SkillLevel::Mid);
        assert_eq!(classify(5), SkillLevel::Mid);
        assert_eq!(classify(4), SkillLevel::Entry);
        assert_eq!(classify(3), SkillLevel::Entry);
        assert_eq!(classify(2), SkillLevel::Beginner);
        assert_eq!(classify(0), SkillLevel::Beginner);
    }

    #[test]
    fn test_scores_above_scale_still_classify() {
        assert_eq!(classify(15), SkillLevel::Master);
    }

    #[test]
    fn test_assessment_derives_level() {
        let assessment = QuizAssessment::new("logic-101", 7);
        assert_eq!(assessment.level, SkillLevel::Senior);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(SkillLevel::Master > SkillLevel::Senior);
        assert!(SkillLevel::Entry > SkillLevel::Beginner);
    }
}
