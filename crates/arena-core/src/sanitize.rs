//! Response sanitization.
//!
//! The upstream service does not reliably honor "return only raw source"
//! instructions: payloads arrive wrapped in code fences, preceded by
//! commentary, or both. Sanitization is a fallback chain of plain textual
//! recovery tiers over that unreliable output. It never fails; when no tier
//! matches, the trimmed input is passed through for the structural validator
//! to reject with a proper diagnostic.

use crate::validate::DIAGRAM_START_TOKENS;

/// What kind of payload the sanitizer should recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// A JSON object (report or profile).
    Json,
    /// Diagram source (Mermaid text).
    Diagram,
}

/// Recovers the intended payload from raw generated text.
///
/// The result is always trimmed of surrounding whitespace. Sanitizing an
/// already-sanitized payload returns the same text.
pub fn sanitize(raw: &str, kind: PayloadKind) -> String {
    let trimmed = raw.trim();

    match kind {
        PayloadKind::Json => sanitize_json(trimmed),
        PayloadKind::Diagram => sanitize_diagram(trimmed),
    }
}

fn sanitize_json(trimmed: &str) -> String {
    if let Some(interior) = labeled_fence_interior(trimmed, "json") {
        return interior;
    }
    // The service occasionally fences JSON without the language label.
    if trimmed.starts_with("```") {
        if let Some(interior) = labeled_fence_interior(trimmed, "") {
            return interior;
        }
    }
    trimmed.to_string()
}

fn sanitize_diagram(trimmed: &str) -> String {
    // Tier (a): a fence explicitly labeled for the diagram language.
    if let Some(interior) = labeled_fence_interior(trimmed, "mermaid") {
        return interior;
    }

    // Tier (b): any generic fence markers; take the span between the first
    // and last so leading and trailing commentary both fall away.
    if let Some(first) = trimmed.find("```") {
        let after = &trimmed[first + 3..];
        if let Some(last) = after.rfind("```") {
            let interior = &after[..last];
            // Drop a language tag on the opening fence line, if any.
            let interior = match interior.find('\n') {
                Some(nl) => &interior[nl + 1..],
                None => interior,
            };
            return interior.trim().to_string();
        }
    }

    // Tier (c): no fences at all; scan for the earliest recognized
    // diagram-start keyword and discard everything before it.
    if let Some(start) = DIAGRAM_START_TOKENS
        .iter()
        .filter_map(|token| trimmed.find(token))
        .min()
    {
        return trimmed[start..].trim().to_string();
    }

    trimmed.to_string()
}

/// Extracts the interior of a fenced block opened by ```<label>.
///
/// Returns `None` when the opening or closing fence is absent.
fn labeled_fence_interior(text: &str, label: &str) -> Option<String> {
    let opener = format!("```{label}");
    let start = text.find(&opener)?;
    let after = &text[start + opener.len()..];
    // The payload begins after the opening fence line.
    let after = after.strip_prefix('\n').unwrap_or(after);
    let end = after.find("```")?;
    Some(after[..end].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_labeled_fence_is_stripped() {
        let raw = "```json\n{\"persuasivenessScore\": 7}\n```";
        assert_eq!(sanitize(raw, PayloadKind::Json), "{\"persuasivenessScore\": 7}");
    }

    #[test]
    fn test_json_unlabeled_fence_is_stripped() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(sanitize(raw, PayloadKind::Json), "{\"a\": 1}");
    }

    #[test]
    fn test_json_plain_text_is_trimmed_only() {
        assert_eq!(sanitize("  {\"a\": 1}  ", PayloadKind::Json), "{\"a\": 1}");
    }

    #[test]
    fn test_json_fence_with_commentary_around_it() {
        let raw = "Here is the report you asked for:\n```json\n{\"a\": 1}\n```\nHope this helps!";
        assert_eq!(sanitize(raw, PayloadKind::Json), "{\"a\": 1}");
    }

    #[test]
    fn test_diagram_mermaid_fence() {
        let raw = "```mermaid\ngraph TD;\nA[\"X\"]-->B[\"Y\"]\n```";
        assert_eq!(
            sanitize(raw, PayloadKind::Diagram),
            "graph TD;\nA[\"X\"]-->B[\"Y\"]"
        );
    }

    #[test]
    fn test_diagram_generic_fences() {
        let raw = "Sure!\n```\ngraph TD;\nA-->B\n```\ntrailing note";
        assert_eq!(sanitize(raw, PayloadKind::Diagram), "graph TD;\nA-->B");
    }

    #[test]
    fn test_diagram_keyword_scan_discards_preamble() {
        let raw = "The argument flow is as follows: graph TD;\nA-->B";
        assert_eq!(sanitize(raw, PayloadKind::Diagram), "graph TD;\nA-->B");
    }

    #[test]
    fn test_diagram_no_match_passes_through_trimmed() {
        assert_eq!(sanitize("  nothing diagram-like  ", PayloadKind::Diagram), "nothing diagram-like");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize("```json\n{\"a\": 1}\n```", PayloadKind::Json);
        assert_eq!(sanitize(&once, PayloadKind::Json), once);

        let once = sanitize("```mermaid\ngraph TD;\nA-->B\n```", PayloadKind::Diagram);
        assert_eq!(sanitize(&once, PayloadKind::Diagram), once);

        let once = sanitize("noise before graph LR;\nA-->B", PayloadKind::Diagram);
        assert_eq!(sanitize(&once, PayloadKind::Diagram), once);
    }
}
