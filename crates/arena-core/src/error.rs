//! Error types for the Arena pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Arena pipeline.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. The pipeline-specific
/// variants map one-to-one onto the failure modes an orchestrating caller
/// has to distinguish: a missing template is a programmer error, an upstream
/// failure is surfaced generically, an empty generation is a soft failure,
/// a structural rejection carries the raw candidate for diagnostics, and
/// insufficient history is a user-actionable precondition.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ArenaError {
    /// Missing or broken prompt template for a locale/kind pair.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream generative service failed after retries were exhausted,
    /// or failed with a non-retryable application error.
    #[error("Upstream error ({status}): {message}", status = .status_code.map(|c| c.to_string()).unwrap_or_else(|| "transport".to_string()))]
    Upstream {
        status_code: Option<u16>,
        message: String,
    },

    /// The service returned a well-formed envelope but no usable content
    /// (e.g., safety-filtered). Callers treat this as a soft failure.
    #[error("Upstream returned an empty response")]
    EmptyResponse,

    /// A sanitized payload failed structural validation. The raw candidate
    /// is attached so the caller can render a diagnostic view.
    #[error("Payload rejected: {reason}")]
    Rejection { reason: String, candidate: String },

    /// Not enough persisted records to synthesize a profile.
    #[error("Insufficient history: found {found} records, {required} required")]
    InsufficientHistory { found: usize, required: usize },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ArenaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an Upstream error
    pub fn upstream(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a Rejection error carrying the raw candidate text
    pub fn rejection(reason: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self::Rejection {
            reason: reason.into(),
            candidate: candidate.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this failure can be degraded to a placeholder reply
    /// instead of aborting the whole operation.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::EmptyResponse)
    }

    /// Check if this is a Rejection error
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejection { .. })
    }

    /// Check if this is an Upstream error
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Check if this is an InsufficientHistory error
    pub fn is_insufficient_history(&self) -> bool {
        matches!(self, Self::InsufficientHistory { .. })
    }

    /// Check if this is a Configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ArenaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ArenaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ArenaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for ArenaError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ArenaError>`.
pub type Result<T> = std::result::Result<T, ArenaError>;
