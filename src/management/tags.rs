use std::{collections::HashMap, path::PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::{
    config,
    error::EraError,
    tags::{CachedTagRow, CachedTags, TagStore, is_stale},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagCacheStats {
    pub rows: usize,
    pub stale: usize,
    pub empty: usize,
}

/// A [`TagStore`] backed by a single JSON file keyed by track id.
///
/// The whole map lives in memory; every upsert rewrites the file.
pub struct TagCacheManager {
    path: PathBuf,
    rows: RwLock<HashMap<String, CachedTags>>,
}

impl TagCacheManager {
    /// Opens the store at `path`, starting empty if the file does not exist.
    pub async fn open(path: PathBuf) -> Result<Self, EraError> {
        let rows = match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| EraError::Store(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            rows: RwLock::new(rows),
        })
    }

    pub async fn open_default() -> Result<Self, EraError> {
        Self::open(Self::default_path()).await
    }

    pub fn default_path() -> PathBuf {
        config::data_dir().join("cache").join("tags.json")
    }

    pub async fn stats(&self, now: DateTime<Utc>, ttl: Duration) -> TagCacheStats {
        let rows = self.rows.read().await;
        TagCacheStats {
            rows: rows.len(),
            stale: rows
                .values()
                .filter(|r| is_stale(r.fetched_at, now, ttl))
                .count(),
            empty: rows.values().filter(|r| r.tags.is_empty()).count(),
        }
    }

    async fn write(&self, rows: &HashMap<String, CachedTags>) -> Result<(), EraError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string(rows)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl TagStore for TagCacheManager {
    async fn bulk_get(&self, track_ids: &[String]) -> Result<HashMap<String, CachedTags>, EraError> {
        let rows = self.rows.read().await;
        Ok(track_ids
            .iter()
            .filter_map(|id| rows.get(id).map(|row| (id.clone(), row.clone())))
            .collect())
    }

    /// Writes the merged map to disk first and only then swaps it in, so a
    /// failed write leaves the in-memory rows as they were.
    async fn bulk_upsert(&self, new_rows: Vec<CachedTagRow>) -> Result<(), EraError> {
        let mut rows = self.rows.write().await;
        let mut merged = rows.clone();
        for row in new_rows {
            merged.insert(row.track_id, row.entry);
        }
        self.write(&merged).await?;
        *rows = merged;
        Ok(())
    }
}
