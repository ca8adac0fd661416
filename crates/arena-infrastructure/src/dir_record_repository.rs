//! Directory-backed DebateRecordRepository implementation.
//!
//! Stores one pretty-printed JSON file per record:
//!
//! ```text
//! base_dir/
//! ├── <owner_id>/
//! │   ├── <record-id-1>.json
//! │   └── <record-id-2>.json
//! ```
//!
//! Listing sorts by the `created_at` field rather than by filename, so the
//! creation-time ascending contract holds regardless of directory iteration
//! order.

use crate::paths::ArenaPaths;
use arena_core::debate::{DebateRecord, DebateRecordRepository};
use arena_core::error::{ArenaError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-per-record repository rooted at a base directory.
pub struct DirDebateRecordRepository {
    base_dir: PathBuf,
}

impl DirDebateRecordRepository {
    /// Creates a repository at the default location (~/.config/arena/records).
    pub async fn default_location() -> Result<Self> {
        let base_dir = ArenaPaths::records_dir()
            .map_err(|e| ArenaError::configuration(format!("Failed to resolve records dir: {e}")))?;
        Self::new(base_dir).await
    }

    /// Creates a repository rooted at `base_dir`, creating it if needed.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    fn owner_dir(&self, owner_id: &str) -> PathBuf {
        self.base_dir.join(owner_id)
    }
}

#[async_trait]
impl DebateRecordRepository for DirDebateRecordRepository {
    async fn append(&self, record: &DebateRecord) -> Result<String> {
        let owner_dir = self.owner_dir(&record.owner_id);
        fs::create_dir_all(&owner_dir).await?;

        let path = owner_dir.join(format!("{}.json", record.id));
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json).await?;

        tracing::debug!(
            "[DirDebateRecordRepository] appended record {} for owner {}",
            record.id,
            record.owner_id
        );
        Ok(record.id.clone())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<DebateRecord>> {
        let owner_dir = self.owner_dir(owner_id);
        if !owner_dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        let mut entries = fs::read_dir(&owner_dir).await?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ArenaError::data_access(format!("Failed to read records dir: {e}")))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str::<DebateRecord>(&content) {
                Ok(record) => records.push(record),
                Err(e) => {
                    // A corrupt file must not poison the whole history.
                    tracing::warn!(
                        "[DirDebateRecordRepository] skipping unreadable record {:?}: {}",
                        path,
                        e
                    );
                }
            }
        }

        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}
