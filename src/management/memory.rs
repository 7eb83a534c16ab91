use std::collections::HashMap;

use async_trait::async_trait;
use moka::future::Cache;

use crate::{
    error::EraError,
    tags::{CachedTagRow, CachedTags, TagStore},
};

const DEFAULT_CAPACITY: u64 = 100_000;

/// A [`TagStore`] that only lives as long as the process.
#[derive(Clone)]
pub struct MemoryTagStore {
    rows: Cache<String, CachedTags>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            rows: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub async fn len(&self) -> u64 {
        self.rows.run_pending_tasks().await;
        self.rows.entry_count()
    }
}

impl Default for MemoryTagStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagStore for MemoryTagStore {
    async fn bulk_get(&self, track_ids: &[String]) -> Result<HashMap<String, CachedTags>, EraError> {
        let mut found = HashMap::with_capacity(track_ids.len());
        for id in track_ids {
            if let Some(row) = self.rows.get(id).await {
                found.insert(id.clone(), row);
            }
        }
        Ok(found)
    }

    async fn bulk_upsert(&self, rows: Vec<CachedTagRow>) -> Result<(), EraError> {
        for row in rows {
            self.rows.insert(row.track_id, row.entry).await;
        }
        Ok(())
    }
}
