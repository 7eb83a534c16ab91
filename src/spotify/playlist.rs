use reqwest::Client;

use crate::{
    error::EraError,
    types::{
        AddTracksToPlaylistRequest, AddTracksToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, Era,
    },
    utils,
};

/// Most track URIs the add-tracks endpoint accepts per request.
pub const TRACKS_PER_REQUEST: usize = 100;

/// A playlist written for one era.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedPlaylist {
    pub id: String,
    pub name: String,
    pub tracks: usize,
}

/// Returns the Spotify user id of the token's owner (`GET /me`).
pub async fn get_current_user_id(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<String, EraError> {
    let url = format!("{}/me", api_url);
    let user: CurrentUser = super::get_json(client, &url, token).await?;
    Ok(user.id)
}

/// Creates a playlist for `user_id`.
///
/// # Arguments
///
/// * `client` - HTTP client
/// * `api_url` - Web API base, usually [`config::spotify_apiurl`](crate::config::spotify_apiurl)
/// * `token` - User access token with a playlist-modify scope
/// * `user_id` - Owner of the new playlist
/// * `request` - Name, description and visibility
///
/// # Returns
///
/// - `Ok(CreatePlaylistResponse)` - The id and name of the new playlist
/// - `Err(EraError)` - Transport error or non-success status
pub async fn create_playlist(
    client: &Client,
    api_url: &str,
    token: &str,
    user_id: &str,
    request: &CreatePlaylistRequest,
) -> Result<CreatePlaylistResponse, EraError> {
    let url = format!("{}/users/{}/playlists", api_url, user_id);
    super::post_json(client, &url, token, request).await
}

/// Appends `uris` to a playlist, [`TRACKS_PER_REQUEST`] at a time.
///
/// Batches are sent in order so the playlist keeps the order of `uris`.
/// Returns the number of requests made; an empty list makes none.
pub async fn add_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<usize, EraError> {
    let url = format!("{}/playlists/{}/tracks", api_url, playlist_id);

    let mut requests = 0;
    for (n, batch) in uris.chunks(TRACKS_PER_REQUEST).enumerate() {
        let body = AddTracksToPlaylistRequest {
            uris: batch.to_vec(),
        };
        let _: AddTracksToPlaylistResponse = super::post_json(client, &url, token, &body)
            .await
            .map_err(|e| {
                tracing::debug!(batch = n, error = %e, "adding tracks failed");
                e
            })?;
        requests += 1;
    }

    Ok(requests)
}

/// Creates a private playlist named after `era` and fills it with the era's
/// tracks in chronological order.
pub async fn create_era_playlist(
    client: &Client,
    api_url: &str,
    token: &str,
    user_id: &str,
    era: &Era,
) -> Result<CreatedPlaylist, EraError> {
    let request = utils::era_playlist_request(era);
    let created = create_playlist(client, api_url, token, user_id, &request).await?;

    add_tracks(
        client,
        api_url,
        token,
        &created.id,
        &utils::track_uris(&era.tracks),
    )
    .await?;

    Ok(CreatedPlaylist {
        id: created.id,
        name: created.name,
        tracks: era.tracks.len(),
    })
}
