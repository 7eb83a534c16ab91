use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Duration, Utc};
use tokio_util::sync::CancellationToken;

use crate::{
    error::EraError,
    tags::{CachedTagRow, CachedTags, TagService, TagStore},
    types::{Tag, TrackKey},
};

/// Days after which a cached lookup is refetched.
pub const CACHE_TTL_DAYS: i64 = 30;

/// Source of the current time, injectable for tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Whether a row fetched at `fetched_at` has outlived `ttl` at `now`.
pub fn is_stale(fetched_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    fetched_at < now - ttl
}

/// Cache-aside tag lookup: store first, live fetch for misses and stale rows.
pub struct CachedTagFetcher {
    store: Arc<dyn TagStore>,
    service: TagService,
    ttl: Duration,
    clock: Clock,
}

impl CachedTagFetcher {
    pub fn new(store: Arc<dyn TagStore>, service: TagService) -> Self {
        Self {
            store,
            service,
            ttl: Duration::days(CACHE_TTL_DAYS),
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns tags keyed by track id.
    ///
    /// Fresh cache rows are used as-is. Everything else is fetched through
    /// the [`TagService`] and written back before being merged in. Tracks
    /// whose live fetch failed are absent from the map. A failed write is
    /// logged and does not affect the result; only a failed cache read is
    /// returned as an error.
    pub async fn get_tags_for_tracks(
        &self,
        tracks: &[TrackKey],
        cancel: &CancellationToken,
    ) -> Result<HashMap<String, Vec<Tag>>, EraError> {
        if tracks.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
        let cached = self.store.bulk_get(&ids).await?;

        let now = (self.clock)();
        let mut result: HashMap<String, Vec<Tag>> = HashMap::with_capacity(tracks.len());
        let mut needs_fetch: Vec<TrackKey> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for track in tracks {
            if !seen.insert(track.id.as_str()) {
                continue;
            }
            match cached.get(&track.id) {
                Some(entry) if !is_stale(entry.fetched_at, now, self.ttl) => {
                    result.insert(track.id.clone(), entry.tags.clone());
                }
                _ => needs_fetch.push(track.clone()),
            }
        }

        tracing::debug!(
            hits = result.len(),
            misses = needs_fetch.len(),
            "tag cache lookup"
        );

        if !needs_fetch.is_empty() {
            let fetched = self.fetch_and_persist(&needs_fetch, cancel).await;
            result.extend(fetched);
        }

        Ok(result)
    }

    async fn fetch_and_persist(
        &self,
        tracks: &[TrackKey],
        cancel: &CancellationToken,
    ) -> HashMap<String, Vec<Tag>> {
        let batch = self.service.fetch_tags_for_tracks(tracks, cancel).await;
        if let Some(e) = &batch.error {
            tracing::warn!(error = %e, "live tag fetch cut short, keeping partial results");
        }

        let fetched_at = (self.clock)();
        let mut fetched = HashMap::with_capacity(batch.results.len());
        let mut rows = Vec::with_capacity(batch.results.len());

        for result in batch.results {
            if result.error.is_some() {
                continue;
            }
            rows.push(CachedTagRow {
                track_id: result.track_id.clone(),
                entry: CachedTags {
                    tags: result.tags.clone(),
                    source: result.source,
                    fetched_at,
                },
            });
            fetched.insert(result.track_id, result.tags);
        }

        if !rows.is_empty() {
            let count = rows.len();
            if let Err(e) = self.store.bulk_upsert(rows).await {
                tracing::warn!(error = %e, rows = count, "failed to persist fetched tags");
            }
        }

        fetched
    }
}
