use reqwest::Client;

use crate::{
    config,
    error::EraError,
    types::{SavedTracksResponse, Track},
    utils,
};

/// Largest page size the saved-tracks endpoint accepts.
pub const PAGE_LIMIT: usize = 50;

/// Fetches one page of saved tracks.
///
/// # Arguments
///
/// * `client` - HTTP client shared across pages
/// * `token` - User access token with the `user-library-read` scope
/// * `offset` - Index of the first saved track to return
///
/// # Returns
///
/// The raw page including the `next` link and the reported total.
pub async fn get_saved_tracks_page(
    client: &Client,
    token: &str,
    offset: usize,
) -> Result<SavedTracksResponse, EraError> {
    let url = format!(
        "{uri}/me/tracks?limit={limit}&offset={offset}",
        uri = config::spotify_apiurl(),
        limit = PAGE_LIMIT,
        offset = offset
    );
    super::get_json(client, &url, token).await
}

/// Fetches every saved track, following `next` until the last page.
///
/// `on_page` is called after each page with the number of tracks fetched so
/// far and the total reported by the API. Saved local files have no id and
/// are left out.
pub async fn get_all_saved_tracks<F>(token: &str, mut on_page: F) -> Result<Vec<Track>, EraError>
where
    F: FnMut(usize, Option<u64>),
{
    let client = Client::new();
    let mut tracks = Vec::new();
    let mut offset = 0;

    loop {
        let page = get_saved_tracks_page(&client, token, offset).await?;
        let fetched = page.items.len();
        offset += fetched;

        tracks.extend(page.items.into_iter().filter_map(utils::convert_saved_track));
        on_page(offset, page.total);

        if page.next.is_none() || fetched == 0 {
            break;
        }
    }

    tracing::debug!(tracks = tracks.len(), "fetched saved tracks");
    Ok(tracks)
}
