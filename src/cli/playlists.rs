use reqwest::Client;

use crate::{
    clustering, config, error, info,
    management::EraManager,
    spotify::playlist,
    success, utils, warning,
};

use super::spinner;

/// Writes the most recent saved eras to Spotify as private playlists.
///
/// Eras are taken newest first; `limit` caps how many are written and `0`
/// writes all of them. With `dry_run` only the summary is printed.
pub async fn create_playlists(dry_run: bool, limit: usize) {
    let saved = match EraManager::at_default_path().load().await {
        Ok(Some(saved)) => saved,
        Ok(None) => {
            warning!("No eras saved yet. Run `eracli eras detect` first.");
            return;
        }
        Err(e) => error!("Cannot load saved eras. Err: {}", e),
    };

    let all = &saved.detection.eras;
    let eras = utils::limit_eras(all, limit);
    if eras.len() < all.len() {
        info!(
            "Showing {} of {} eras (use --limit 0 for all).",
            eras.len(),
            all.len()
        );
    }

    print!(
        "{}",
        clustering::format_era_summary(eras, &saved.detection.outliers)
    );

    if dry_run {
        info!("Dry run: no playlists created.");
        return;
    }

    if eras.is_empty() {
        warning!("No eras to create playlists for.");
        return;
    }

    let token = match config::spotify_token() {
        Ok(t) => t,
        Err(e) => error!("{}. Add it to {}", e, config::env_path().display()),
    };
    let api_url = config::spotify_apiurl();
    let client = Client::new();

    let user_id = match playlist::get_current_user_id(&client, &api_url, &token).await {
        Ok(id) => id,
        Err(e) => error!("Cannot look up the Spotify user. Err: {}", e),
    };

    let mut created = 0;
    for (i, era) in eras.iter().enumerate() {
        let pb = spinner(&format!("Creating playlist \"{}\"...", era.name));
        let result = playlist::create_era_playlist(&client, &api_url, &token, &user_id, era).await;
        pb.finish_and_clear();

        match result {
            Ok(p) => {
                created += 1;
                success!(
                    "Created playlist {}/{}: \"{}\" ({} {})",
                    i + 1,
                    eras.len(),
                    p.name,
                    p.tracks,
                    utils::plural(p.tracks, "track", "tracks")
                );
            }
            Err(e) => warning!("Failed to create playlist \"{}\". Err: {}", era.name, e),
        }
    }

    if created == eras.len() {
        success!(
            "Created {} {}.",
            created,
            utils::plural(created, "playlist", "playlists")
        );
    } else {
        warning!("Created {} of {} playlists.", created, eras.len());
    }
}
