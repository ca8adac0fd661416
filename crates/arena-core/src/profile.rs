//! Longitudinal profile aggregation.
//!
//! Folds a user's historical debate records into the raw material for a
//! synthesized skill profile: a persuasiveness score series and a fallacy
//! frequency table, plus a deterministic textual summary embedded into the
//! second-stage profile prompt.

use crate::debate::DebateRecord;
use crate::error::{ArenaError, Result};

/// Minimum record count before a profile can be synthesized.
///
/// Below this the aggregation fails with `InsufficientHistory`; that is a
/// user-facing precondition, not a system fault.
pub const MIN_RECORDS_FOR_PROFILE: usize = 3;

/// The aggregated inputs to profile synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInput {
    /// One persuasiveness score per record, in record order.
    pub score_series: Vec<u8>,
    /// Fallacy category to occurrence count, in first-encountered order.
    pub fallacy_counts: Vec<(String, u32)>,
    /// Deterministic rendering of both structures for the profile prompt.
    pub summary_data: String,
}

impl ProfileInput {
    /// The most frequent fallacy category.
    ///
    /// Ties break toward the first-encountered category, so the result is
    /// deterministic under replay of the same record ordering.
    pub fn dominant_fallacy(&self) -> Option<&str> {
        self.fallacy_counts
            .iter()
            .max_by_key(|(_, count)| *count)
            .map(|(category, _)| category.as_str())
    }
}

/// Folds an ordered record history into a [`ProfileInput`].
///
/// Records whose weak point carries no fallacy category are skipped in the
/// frequency table but still contribute their score to the series.
pub fn aggregate(records: &[DebateRecord]) -> Result<ProfileInput> {
    if records.len() < MIN_RECORDS_FOR_PROFILE {
        return Err(ArenaError::InsufficientHistory {
            found: records.len(),
            required: MIN_RECORDS_FOR_PROFILE,
        });
    }

    let score_series: Vec<u8> = records
        .iter()
        .map(|r| r.report.persuasiveness_score)
        .collect();

    let mut fallacy_counts: Vec<(String, u32)> = Vec::new();
    for record in records {
        let category = record.report.weak_point.fallacy_type.trim();
        if category.is_empty() {
            continue;
        }
        match fallacy_counts.iter_mut().find(|(c, _)| c.as_str() == category) {
            Some((_, count)) => *count += 1,
            None => fallacy_counts.push((category.to_string(), 1)),
        }
    }

    let summary_data = render_summary(&score_series, &fallacy_counts);

    Ok(ProfileInput {
        score_series,
        fallacy_counts,
        summary_data,
    })
}

fn render_summary(scores: &[u8], fallacies: &[(String, u32)]) -> String {
    let scores_line = scores
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let fallacies_line = if fallacies.is_empty() {
        "none identified".to_string()
    } else {
        fallacies
            .iter()
            .map(|(category, count)| format!("{category} x{count}"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!("scores: [{scores_line}]\nfallacies: {fallacies_line}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{DiagramArtifact, Report, WeakPoint};

    fn record(score: u8, fallacy: &str) -> DebateRecord {
        DebateRecord::new(
            "owner-1",
            "topic",
            Report {
                strongest_argument: String::new(),
                weak_point: WeakPoint {
                    fallacy_type: fallacy.to_string(),
                    ..WeakPoint::default()
                },
                evidence_usage: String::new(),
                persuasiveness_score: score,
                overall_comment: String::new(),
            },
            DiagramArtifact::empty(),
        )
    }

    #[test]
    fn test_fewer_than_three_records_is_insufficient() {
        let records = vec![record(5, "A"), record(6, "B")];
        let err = aggregate(&records).unwrap_err();
        assert!(err.is_insufficient_history());
        match err {
            ArenaError::InsufficientHistory { found, required } => {
                assert_eq!(found, 2);
                assert_eq!(required, 3);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_dominant_fallacy_by_count() {
        let records = vec![record(7, "A"), record(5, "B"), record(9, "A")];
        let input = aggregate(&records).unwrap();
        assert_eq!(input.dominant_fallacy(), Some("A"));
        assert_eq!(input.score_series, vec![7, 5, 9]);
    }

    #[test]
    fn test_tie_breaks_toward_first_encountered() {
        let records = vec![record(5, "B"), record(5, "A"), record(5, "A"), record(5, "B")];
        let input = aggregate(&records).unwrap();
        assert_eq!(input.dominant_fallacy(), Some("B"));
    }

    #[test]
    fn test_empty_fallacy_category_is_skipped() {
        let records = vec![record(5, ""), record(6, "A"), record(7, "  ")];
        let input = aggregate(&records).unwrap();
        assert_eq!(input.fallacy_counts, vec![("A".to_string(), 1)]);
        // Scores still contribute.
        assert_eq!(input.score_series, vec![5, 6, 7]);
    }

    #[test]
    fn test_summary_is_deterministic() {
        let records = vec![record(7, "A"), record(5, "B"), record(9, "A")];
        let first = aggregate(&records).unwrap().summary_data;
        let second = aggregate(&records).unwrap().summary_data;
        assert_eq!(first, second);
        assert_eq!(first, "scores: [7, 5, 9]\nfallacies: A x2, B x1");
    }
}
