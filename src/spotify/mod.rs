//! # Spotify Web API
//!
//! Read-only access to the pieces of the Web API that era detection needs:
//!
//! - [`tracks`] pages through the user's saved tracks (`GET /me/tracks`).
//! - [`audio_features`] looks up energy, valence, danceability and
//!   acousticness for those tracks (`GET /audio-features`) in batches.
//! - [`playlist`] writes eras back as private playlists
//!   (`POST /users/{id}/playlists`, `POST /playlists/{id}/tracks`).
//!
//! All requests use a user access token passed in by the caller and the
//! base URL from [`config::spotify_apiurl`](crate::config::spotify_apiurl).
//! Playlist writes also need the `playlist-modify-private` scope.
//!
//! ## Retries
//!
//! - `429 Too Many Requests` waits for `Retry-After` seconds and retries, as
//!   long as the server asks for at most two minutes. Longer waits are
//!   reported and end in [`EraError::RateLimited`].
//! - `502 Bad Gateway` is retried after ten seconds.
//!
//! Any other non-success status is returned as [`EraError::Http`].

pub mod audio_features;
pub mod playlist;
pub mod tracks;

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::time::sleep;

use crate::{error::EraError, warning};

const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);

/// GETs `url` with bearer `token` and decodes the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    token: &str,
) -> Result<T, EraError> {
    send_json::<T, ()>(client, Method::GET, url, token, None).await
}

/// POSTs `body` as JSON to `url` and decodes the JSON response.
pub(crate) async fn post_json<T, B>(
    client: &Client,
    url: &str,
    token: &str,
    body: &B,
) -> Result<T, EraError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    send_json(client, Method::POST, url, token, Some(body)).await
}

async fn send_json<T, B>(
    client: &Client,
    method: Method,
    url: &str,
    token: &str,
    body: Option<&B>,
) -> Result<T, EraError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    loop {
        let mut request = client.request(method.clone(), url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);

                if retry_after > MAX_RETRY_AFTER_SECS {
                    warning!(
                        "Spotify asks to wait {} seconds before the next request. Try again later.",
                        retry_after
                    );
                    return Err(EraError::RateLimited);
                }
                tracing::debug!(retry_after, url, "spotify rate limited");
                sleep(Duration::from_secs(retry_after)).await;
            }
            StatusCode::BAD_GATEWAY => {
                tracing::debug!(url, "spotify returned 502, retrying");
                sleep(BAD_GATEWAY_DELAY).await;
            }
            _ => {
                let response = response.error_for_status()?;
                return Ok(response.json::<T>().await?);
            }
        }
    }
}
