//! Provenance checking for quoted sentences.
//!
//! A report quotes one user sentence as the example of the identified weak
//! point. The service sometimes invents that quote. This check verifies the
//! quote actually traces back to a user-authored transcript line and
//! substitutes a generic placeholder when it does not, leaving the rest of
//! the report untouched. It is a best-effort grounding heuristic over
//! trimmed, case-folded text, not a guarantee.

use crate::report::Report;

/// Substituted for a quoted sentence that could not be traced back to the
/// user's transcript lines.
pub const UNVERIFIED_QUOTE_PLACEHOLDER: &str =
    "(no directly quotable sentence was identified in the transcript)";

/// Verifies the report's quoted sentence against the user's own lines.
///
/// `user_sentences` is the ordered sequence of user-authored transcript
/// lines; opponent lines must not be included. The quote matches a line when
/// either contains the other, case-insensitively, after trimming. An empty
/// quote counts as unmatched. On no match the quote is replaced by
/// [`UNVERIFIED_QUOTE_PLACEHOLDER`].
pub fn check_report(mut report: Report, user_sentences: &[&str]) -> Report {
    if !is_grounded(&report.weak_point.quoted_sentence, user_sentences) {
        tracing::warn!(
            "[Provenance] quoted sentence not found in user transcript, substituting placeholder"
        );
        report.weak_point.quoted_sentence = UNVERIFIED_QUOTE_PLACEHOLDER.to_string();
    }
    report
}

fn is_grounded(quoted: &str, user_sentences: &[&str]) -> bool {
    let quoted = quoted.trim().to_lowercase();
    if quoted.is_empty() {
        return false;
    }

    user_sentences.iter().any(|sentence| {
        let sentence = sentence.trim().to_lowercase();
        !sentence.is_empty() && (quoted.contains(&sentence) || sentence.contains(&quoted))
    })
}
