//! # Tag enrichment
//!
//! Supplies tags to the tag-similarity clusterer.
//!
//! - [`TagService`] fans a batch of tracks out over a fixed pool of workers,
//!   one fetch per track, and returns one result per track in input order.
//!   A failed fetch only affects its own result.
//! - [`CachedTagFetcher`] puts a [`TagStore`] in front of the service: fresh
//!   cache rows are used as-is, misses and stale rows are fetched live and
//!   written back.
//!
//! Both sit on two seams: [`TagFetcher`] (the live source, Last.fm in
//! production) and [`TagStore`] (bulk read/write persistence).

mod cache;
mod service;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::EraError,
    types::{Tag, TagSource, TrackKey},
};

pub use cache::{CACHE_TTL_DAYS, CachedTagFetcher, Clock, is_stale};
pub use service::{BatchResult, DEFAULT_CONCURRENCY, TagService, TrackTags};

/// Tags returned by a live source together with where they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedTags {
    pub tags: Vec<Tag>,
    pub source: TagSource,
}

/// A live tag source.
#[async_trait]
pub trait TagFetcher: Send + Sync {
    async fn fetch_tags(&self, track: &TrackKey) -> Result<FetchedTags, EraError>;
}

/// A cached tag lookup with the time it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedTags {
    pub tags: Vec<Tag>,
    pub source: TagSource,
    pub fetched_at: DateTime<Utc>,
}

/// A row written back to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedTagRow {
    pub track_id: String,
    pub entry: CachedTags,
}

/// Bulk persistence for fetched tags.
///
/// The store never decides freshness; callers compare `fetched_at` against
/// their own TTL.
#[async_trait]
pub trait TagStore: Send + Sync {
    async fn bulk_get(&self, track_ids: &[String]) -> Result<HashMap<String, CachedTags>, EraError>;

    /// Inserts or replaces the rows for the given tracks.
    async fn bulk_upsert(&self, rows: Vec<CachedTagRow>) -> Result<(), EraError>;
}
