use chrono::{Duration, Utc};

use crate::{
    config, info,
    management::{EraManager, LibraryManager, TagCacheManager},
    tags::CACHE_TTL_DAYS,
    warning,
};

/// Prints what is in the local cache.
pub async fn info() {
    info!("Data directory: {}", config::data_dir().display());

    match LibraryManager::load_default().await {
        Ok(lib) => {
            info!("Tracks: {}", lib.count());
            info!("Tracks with tags: {}", lib.count_tagged());
            info!(
                "Tracks with audio features: {}",
                lib.count_with_audio_features()
            );
        }
        Err(e) => warning!("Cannot read library cache. Err: {}", e),
    }

    match TagCacheManager::open_default().await {
        Ok(store) => {
            let stats = store
                .stats(Utc::now(), Duration::days(CACHE_TTL_DAYS))
                .await;
            info!(
                "Tag cache: {} rows, {} without tags, {} older than {} days",
                stats.rows, stats.empty, stats.stale, CACHE_TTL_DAYS
            );
        }
        Err(e) => warning!("Cannot read tag cache. Err: {}", e),
    }

    match EraManager::at_default_path().load().await {
        Ok(Some(saved)) => info!(
            "Last detection: {} eras, {} outliers ({} strategy, {})",
            saved.detection.eras.len(),
            saved.detection.outliers.len(),
            saved.strategy,
            saved.detected_at.format("%Y-%m-%d")
        ),
        Ok(None) => info!("No eras detected yet."),
        Err(e) => warning!("Cannot read saved eras. Err: {}", e),
    }
}
