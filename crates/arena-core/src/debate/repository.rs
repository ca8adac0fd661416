//! Debate record repository trait.
//!
//! Defines the persistence boundary for completed debate records.

use super::record::DebateRecord;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the append-only debate record history.
///
/// This trait defines the contract for persisting and retrieving records,
/// decoupling the pipeline from the specific storage mechanism (in-memory,
/// JSON files, database). The pipeline requires no update or delete: records
/// are written exactly once per completed session.
///
/// # Implementation Notes
///
/// `list_by_owner` must return records in creation-time ascending order;
/// the profile aggregation relies on that ordering for determinism.
/// At most one writer per record is assumed (appends are keyed by session),
/// so implementations need no cross-session locking.
#[async_trait]
pub trait DebateRecordRepository: Send + Sync {
    /// Appends a completed record to the owner's history.
    ///
    /// # Returns
    ///
    /// - `Ok(id)`: The id of the stored record
    /// - `Err(_)`: Error occurred during persistence
    async fn append(&self, record: &DebateRecord) -> Result<String>;

    /// Lists all records belonging to an owner, creation time ascending.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<DebateRecord>)`: The owner's history (may be empty)
    /// - `Err(_)`: Error occurred during retrieval
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<DebateRecord>>;
}
