use std::sync::Arc;

use chrono::Duration;
use tokio_util::sync::CancellationToken;

use crate::{
    error, info,
    lastfm::LastfmClient,
    management::{LibraryManager, TagCacheManager},
    success,
    tags::{CACHE_TTL_DAYS, CachedTagFetcher, TagService},
    types::TrackKey,
    utils, warning,
};

use super::spinner;

/// Looks up Last.fm tags for every track in the library.
///
/// Cached lookups younger than `ttl_days` are reused. Ctrl-C stops the run
/// after the in-flight requests; whatever was fetched until then is kept.
pub async fn update_tags(concurrency: usize, ttl_days: Option<i64>) {
    let mut library = match LibraryManager::load_default().await {
        Ok(lib) => lib,
        Err(e) => error!("Cannot load library cache. Err: {}", e),
    };
    if library.count() == 0 {
        warning!("Library is empty. Run `eracli library sync` first.");
        return;
    }

    let client = match LastfmClient::from_env() {
        Ok(c) => c,
        Err(e) => error!("Cannot set up Last.fm client. Err: {}", e),
    };

    let store = match TagCacheManager::open_default().await {
        Ok(s) => s,
        Err(e) => error!("Cannot open tag cache. Err: {}", e),
    };

    let service = TagService::new(Arc::new(client)).with_concurrency(concurrency);
    let fetcher = CachedTagFetcher::new(Arc::new(store), service)
        .with_ttl(Duration::days(ttl_days.unwrap_or(CACHE_TTL_DAYS)));

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let keys: Vec<TrackKey> = library.tracks().iter().map(|t| t.key()).collect();

    let pb = spinner(&format!("Fetching tags for {} tracks...", keys.len()));
    let result = fetcher.get_tags_for_tracks(&keys, &cancel).await;
    pb.finish_and_clear();

    let tags = match result {
        Ok(t) => t,
        Err(e) => error!("Failed to read tag cache. Err: {}", e),
    };

    if cancel.is_cancelled() {
        warning!("Interrupted, keeping the tags fetched so far.");
    }

    let applied = utils::apply_tags(library.tracks_mut(), &tags);
    let missing = library.count() - applied;
    if missing > 0 {
        warning!(
            "No tags for {} {}.",
            missing,
            utils::plural(missing, "track", "tracks")
        );
    }

    if let Err(e) = library.persist().await {
        error!("Failed to write library cache. Err: {}", e);
    }

    info!(
        "{} of {} tracks have tags.",
        library.count_tagged(),
        library.count()
    );
    success!("Tags updated.");
}
