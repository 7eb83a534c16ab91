use crate::{
    config, error, info,
    management::LibraryManager,
    spotify::{audio_features, tracks},
    success, warning,
};

use super::spinner;

/// Downloads the saved tracks and stores them in the library cache.
///
/// Tags and audio features from earlier runs survive the sync. With
/// `with_audio_features` the mood features are refreshed for every track.
pub async fn sync_library(with_audio_features: bool) {
    let token = match config::spotify_token() {
        Ok(t) => t,
        Err(e) => error!("{}. Add it to {}", e, config::env_path().display()),
    };

    let mut library = match LibraryManager::load_default().await {
        Ok(lib) => lib,
        Err(e) => error!("Cannot load library cache. Err: {}", e),
    };

    let pb = spinner("Fetching saved tracks...");
    let fetched = tracks::get_all_saved_tracks(&token, |fetched, total| match total {
        Some(total) => pb.set_message(format!("Fetching saved tracks... {}/{}", fetched, total)),
        None => pb.set_message(format!("Fetching saved tracks... {}", fetched)),
    })
    .await;
    pb.finish_and_clear();

    let fetched = match fetched {
        Ok(f) => f,
        Err(e) => error!("Failed to fetch saved tracks. Err: {}", e),
    };

    let added = library.merge(fetched);
    info!("Library has {} tracks ({} new).", library.count(), added);

    if with_audio_features {
        let pb = spinner("Fetching audio features...");
        let result =
            audio_features::fetch_audio_features(&token, library.tracks_mut(), |done, total| {
                pb.set_message(format!("Fetching audio features... {}/{}", done, total))
            })
            .await;
        pb.finish_and_clear();

        match result {
            Ok(n) => info!("Audio features available for {} tracks.", n),
            Err(e) => warning!("Could not fetch audio features. Err: {}", e),
        }
    }

    if let Err(e) = library.persist().await {
        error!("Failed to write library cache. Err: {}", e);
    }
    success!("Library synced.");
}
