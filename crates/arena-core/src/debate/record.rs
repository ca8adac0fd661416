//! Persisted debate record.

use crate::report::{DiagramArtifact, Report};
use serde::{Deserialize, Serialize};

/// The subset of a finished session that survives it.
///
/// Created exactly once per completed session and immutable thereafter;
/// the repository keeps an append-only history per owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateRecord {
    /// Unique record identifier (UUID format).
    pub id: String,
    /// The user this record belongs to.
    pub owner_id: String,
    /// The debate topic.
    pub topic: String,
    /// Creation timestamp (ISO 8601 format).
    pub created_at: String,
    /// The validated, provenance-checked performance report.
    pub report: Report,
    /// The validated diagram, or the empty artifact when the diagram was
    /// degraded to a diagnostic.
    pub diagram: DiagramArtifact,
}

impl DebateRecord {
    /// Creates a new record with a fresh id and the current timestamp.
    pub fn new(
        owner_id: impl Into<String>,
        topic: impl Into<String>,
        report: Report,
        diagram: DiagramArtifact,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            topic: topic.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            report,
            diagram,
        }
    }
}
