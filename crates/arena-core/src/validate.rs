//! Structural validation of sanitized payloads.
//!
//! Validation is the gate between untrusted recovered text and the typed
//! artifacts the rest of the system operates on. Malformed output is either
//! repaired (documented defaults for missing optional fields, numeric
//! strings parsed, out-of-range scores clamped) or rejected with the raw
//! candidate attached so the caller can render a diagnostic view instead of
//! crashing.

use crate::error::{ArenaError, Result};
use crate::report::{DiagramArtifact, Profile, Report, WeakPoint};
use serde_json::Value;

/// Start tokens a diagram source is allowed to open with.
pub const DIAGRAM_START_TOKENS: &[&str] = &[
    "graph TD",
    "graph LR",
    "graph BT",
    "graph RL",
    "flowchart TD",
    "flowchart LR",
    "flowchart BT",
    "flowchart RL",
    "sequenceDiagram",
    "mindmap",
];

/// Bounds for the persuasiveness score.
const SCORE_MIN: u8 = 1;
const SCORE_MAX: u8 = 10;

/// Parses a sanitized candidate into a [`Report`].
///
/// Required keys: `strongestArgument` (string), `weakPoint` (object) and
/// `persuasivenessScore` (integer; a numeric string is parsed, the value is
/// clamped into 1-10). `evidenceUsage`, `overallComment` and every
/// `weakPoint` sub-field default to the empty string when absent.
pub fn validate_report(candidate: &str) -> Result<Report> {
    let object = parse_object(candidate)?;

    let strongest_argument = require_string(&object, "strongestArgument", candidate)?;

    let weak_value = object.get("weakPoint").ok_or_else(|| {
        ArenaError::rejection("missing required key 'weakPoint'", candidate)
    })?;
    let weak_obj = weak_value.as_object().ok_or_else(|| {
        ArenaError::rejection("'weakPoint' is not an object", candidate)
    })?;

    let weak_point = WeakPoint {
        fallacy_type: optional_string(weak_obj, "fallacyType"),
        fallacy_definition: optional_string(weak_obj, "fallacyDefinition"),
        quoted_sentence: optional_string(weak_obj, "quotedSentence"),
        improvement_advice: optional_string(weak_obj, "improvementAdvice"),
    };

    let score_value = object.get("persuasivenessScore").ok_or_else(|| {
        ArenaError::rejection("missing required key 'persuasivenessScore'", candidate)
    })?;
    let persuasiveness_score = coerce_score(score_value).ok_or_else(|| {
        ArenaError::rejection("'persuasivenessScore' is not an integer", candidate)
    })?;

    Ok(Report {
        strongest_argument,
        weak_point,
        evidence_usage: optional_string(&object, "evidenceUsage"),
        persuasiveness_score,
        overall_comment: optional_string(&object, "overallComment"),
    })
}

/// Parses a sanitized candidate into a [`Profile`].
///
/// Every field is a string defaulting to empty; only a candidate that is
/// not a JSON object at all is rejected.
pub fn validate_profile(candidate: &str) -> Result<Profile> {
    let object = parse_object(candidate)?;

    Ok(Profile {
        dominant_fallacy: optional_string(&object, "dominantFallacy"),
        advice_for_fallacy: optional_string(&object, "adviceForFallacy"),
        style: optional_string(&object, "style"),
        strength: optional_string(&object, "strength"),
        growth_area: optional_string(&object, "growthArea"),
    })
}

/// Validates candidate text as diagram source.
///
/// The trimmed text must start with a recognized start token and every
/// opened bracket, brace, parenthesis and double quote must be closed before
/// end of text. Bracket characters inside quoted segments are inert. On
/// failure the raw candidate travels with the error; nothing is silently
/// truncated.
pub fn validate_diagram(candidate: &str) -> Result<DiagramArtifact> {
    let trimmed = candidate.trim();

    if trimmed.is_empty() {
        return Err(ArenaError::rejection("diagram source is empty", candidate));
    }

    if !DIAGRAM_START_TOKENS
        .iter()
        .any(|token| trimmed.starts_with(token))
    {
        return Err(ArenaError::rejection(
            "diagram source does not start with a recognized token",
            candidate,
        ));
    }

    if let Err(reason) = check_balance(trimmed) {
        return Err(ArenaError::rejection(reason, candidate));
    }

    Ok(DiagramArtifact {
        source_text: trimmed.to_string(),
    })
}

fn parse_object(candidate: &str) -> Result<serde_json::Map<String, Value>> {
    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| ArenaError::rejection(format!("invalid JSON: {e}"), candidate))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ArenaError::rejection(
            "payload is not a JSON object",
            candidate,
        )),
    }
}

fn require_string(
    object: &serde_json::Map<String, Value>,
    key: &str,
    candidate: &str,
) -> Result<String> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ArenaError::rejection(
            format!("'{key}' is not a string"),
            candidate,
        )),
        None => Err(ArenaError::rejection(
            format!("missing required key '{key}'"),
            candidate,
        )),
    }
}

fn optional_string(object: &serde_json::Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Coerces a score value into the 1-10 range.
///
/// The service is asked for a bare number but occasionally returns it as a
/// string or a float; both are repaired rather than rejected.
fn coerce_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };

    Some(raw.clamp(SCORE_MIN as i64, SCORE_MAX as i64) as u8)
}

/// Checks that brackets, braces, parentheses and double quotes pair up.
fn check_balance(text: &str) -> std::result::Result<(), String> {
    let mut stack: Vec<char> = Vec::new();
    let mut in_quotes = false;

    for ch in text.chars() {
        if in_quotes {
            if ch == '"' {
                in_quotes = false;
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            '(' | '[' | '{' => stack.push(ch),
            ')' | ']' | '}' => {
                let expected = match ch {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return Err(format!("unmatched closing '{ch}'"));
                }
            }
            _ => {}
        }
    }

    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if let Some(open) = stack.pop() {
        return Err(format!("unclosed '{open}'"));
    }

    Ok(())
}
