//! In-memory DebateRecordRepository implementation.
//!
//! Keeps per-owner record histories in process memory. Used as the test
//! double and for ephemeral setups that do not need persistence across
//! restarts.

use arena_core::debate::{DebateRecord, DebateRecordRepository};
use arena_core::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory, per-owner append-only record store.
#[derive(Default)]
pub struct InMemoryDebateRecordRepository {
    records: RwLock<HashMap<String, Vec<DebateRecord>>>,
}

impl InMemoryDebateRecordRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DebateRecordRepository for InMemoryDebateRecordRepository {
    async fn append(&self, record: &DebateRecord) -> Result<String> {
        let mut records = self.records.write().await;
        records
            .entry(record.owner_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record.id.clone())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<DebateRecord>> {
        let records = self.records.read().await;
        Ok(records.get(owner_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::report::{DiagramArtifact, Report, WeakPoint};

    fn record(owner: &str, topic: &str) -> DebateRecord {
        DebateRecord::new(
            owner,
            topic,
            Report {
                strongest_argument: String::new(),
                weak_point: WeakPoint::default(),
                evidence_usage: String::new(),
                persuasiveness_score: 5,
                overall_comment: String::new(),
            },
            DiagramArtifact::empty(),
        )
    }

    #[tokio::test]
    async fn test_append_and_list_preserves_order() {
        let repo = InMemoryDebateRecordRepository::new();
        repo.append(&record("u1", "first")).await.unwrap();
        repo.append(&record("u1", "second")).await.unwrap();

        let listed = repo.list_by_owner("u1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].topic, "first");
        assert_eq!(listed[1].topic, "second");
    }

    #[tokio::test]
    async fn test_owners_are_isolated() {
        let repo = InMemoryDebateRecordRepository::new();
        repo.append(&record("u1", "a")).await.unwrap();
        repo.append(&record("u2", "b")).await.unwrap();

        assert_eq!(repo.list_by_owner("u1").await.unwrap().len(), 1);
        assert_eq!(repo.list_by_owner("u2").await.unwrap().len(), 1);
        assert!(repo.list_by_owner("nobody").await.unwrap().is_empty());
    }
}
