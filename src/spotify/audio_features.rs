use std::collections::HashMap;

use reqwest::Client;

use crate::{
    config,
    error::EraError,
    types::{AudioFeatures, AudioFeaturesResponse, Track},
};

/// Most ids the audio-features endpoint accepts per request.
pub const BATCH_SIZE: usize = 100;

/// Retrieves audio features for up to [`BATCH_SIZE`] tracks.
///
/// # Arguments
///
/// * `client` - HTTP client shared across batches
/// * `token` - User access token
/// * `ids` - Spotify track ids, at most [`BATCH_SIZE`] of them
///
/// # Returns
///
/// - `Ok(Vec<AudioFeatures>)` - Features for every id Spotify knows; ids
///   without features are dropped
/// - `Err(EraError)` - Transport error, non-success status or a wait the
///   rate limiter asked for that is too long
///
/// # Example
///
/// ```
/// let client = Client::new();
/// let features = get_audio_features(&client, &token, &["4uLU6hMCjMI75M1A2tKUQC"]).await?;
/// ```
pub async fn get_audio_features(
    client: &Client,
    token: &str,
    ids: &[&str],
) -> Result<Vec<AudioFeatures>, EraError> {
    let url = format!(
        "{uri}/audio-features?ids={ids}",
        uri = config::spotify_apiurl(),
        ids = ids.join(",")
    );
    let response: AudioFeaturesResponse = super::get_json(client, &url, token).await?;
    Ok(response.audio_features.into_iter().flatten().collect())
}

/// Copies the four mood features onto a track.
pub fn apply_audio_features(track: &mut Track, features: &AudioFeatures) {
    track.energy = Some(features.energy);
    track.valence = Some(features.valence);
    track.danceability = Some(features.danceability);
    track.acousticness = Some(features.acousticness);
}

/// Looks up audio features for all tracks and applies them in place.
///
/// Tracks Spotify has no features for are left untouched. Returns the
/// number of tracks that received features.
pub async fn fetch_audio_features<F>(
    token: &str,
    tracks: &mut [Track],
    mut on_batch: F,
) -> Result<usize, EraError>
where
    F: FnMut(usize, usize),
{
    if tracks.is_empty() {
        return Ok(0);
    }

    let client = Client::new();
    let index_by_id: HashMap<String, usize> = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.clone(), i))
        .collect();
    let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();

    let total = ids.len();
    let mut applied = 0;
    for (n, batch) in ids.chunks(BATCH_SIZE).enumerate() {
        let batch: Vec<&str> = batch.iter().map(String::as_str).collect();
        let features = get_audio_features(&client, token, &batch).await?;

        for f in &features {
            if let Some(&i) = index_by_id.get(&f.id) {
                apply_audio_features(&mut tracks[i], f);
                applied += 1;
            }
        }
        on_batch((n * BATCH_SIZE + batch.len()).min(total), total);
    }

    Ok(applied)
}
