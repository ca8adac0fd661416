//! Strict output schemas for structured generation.
//!
//! When the service supports structured output, the request carries one of
//! these schemas and the service conforms its own output to it, which
//! removes most of the sanitizer/validator burden downstream. The schemas
//! use the service's OpenAPI-style type vocabulary.

use serde_json::{Value, json};

/// Schema for a performance report.
pub fn report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "strongestArgument": { "type": "STRING" },
            "weakPoint": {
                "type": "OBJECT",
                "properties": {
                    "fallacyType": { "type": "STRING" },
                    "fallacyDefinition": { "type": "STRING" },
                    "quotedSentence": { "type": "STRING" },
                    "improvementAdvice": { "type": "STRING" }
                },
                "required": ["fallacyType", "quotedSentence"]
            },
            "evidenceUsage": { "type": "STRING" },
            "persuasivenessScore": { "type": "INTEGER" },
            "overallComment": { "type": "STRING" }
        },
        "required": ["strongestArgument", "weakPoint", "persuasivenessScore"]
    })
}

/// Schema for a synthesized skill profile.
pub fn profile_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "dominantFallacy": { "type": "STRING" },
            "adviceForFallacy": { "type": "STRING" },
            "style": { "type": "STRING" },
            "strength": { "type": "STRING" },
            "growthArea": { "type": "STRING" }
        },
        "required": ["dominantFallacy", "adviceForFallacy", "style", "strength", "growthArea"]
    })
}
