//! # Last.fm tag source
//!
//! [`LastfmClient`] is the production [`TagFetcher`]. For each track it asks
//! `track.getTopTags` first and falls back to `artist.getTopTags` when the
//! track has no tags of its own. Both lookups are memoised in memory for the
//! lifetime of the client, so a library with many tracks by the same artist
//! only pays for the artist lookup once.
//!
//! Last.fm reports failures inside a `200 OK` JSON body (`{"error": 29,
//! "message": "..."}`). Code 29 is retried with a 1s, 2s, 4s backoff before
//! giving up with [`EraError::RateLimited`]. Code 10 maps to
//! [`EraError::InvalidApiKey`]. Anything else becomes [`EraError::Api`].

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use tokio::time::sleep;

use crate::{
    config,
    error::EraError,
    tags::{FetchedTags, TagFetcher},
    types::{LastfmErrorResponse, Tag, TagSource, TopTagsResponse, TrackKey},
};

const USER_AGENT: &str = concat!("eracli/", env!("CARGO_PKG_VERSION"));

const ERR_INVALID_API_KEY: i64 = 10;
const ERR_RATE_LIMITED: i64 = 29;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CACHE_CAPACITY: u64 = 50_000;

pub struct LastfmClient {
    http: Client,
    api_key: String,
    base_url: String,
    retry_delays: Vec<Duration>,
    cache: Cache<String, Vec<Tag>>,
}

impl LastfmClient {
    pub fn new(api_key: &str) -> Result<Self, EraError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url: config::DEFAULT_LASTFM_API_URL.to_string(),
            retry_delays: vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
            ],
            cache: Cache::builder().max_capacity(CACHE_CAPACITY).build(),
        })
    }

    /// Builds a client from `LASTFM_API_KEY` and `LASTFM_API_URL`.
    pub fn from_env() -> Result<Self, EraError> {
        let client = Self::new(&config::lastfm_api_key()?)?;
        Ok(client.with_base_url(&config::lastfm_api_url()))
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Uses `http` instead of the client built in [`LastfmClient::new`]. The
    /// request timeout is then whatever `http` was configured with.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the rate-limit backoff schedule. One retry per entry.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Fetches the top tags of a single track via `track.getTopTags`.
    ///
    /// Results, including empty ones, are memoised for the lifetime of the
    /// client under `track:{artist}:{track}`.
    ///
    /// # Arguments
    ///
    /// * `artist` - Artist name as shown on Spotify
    /// * `track` - Track title; Last.fm autocorrects small misspellings
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Tag>)` - Tags with their weights, possibly empty
    /// - `Err(EraError)` - Rate limited after all retries, rejected API key,
    ///   another API error or a transport failure
    ///
    /// # Example
    ///
    /// ```
    /// let lastfm = LastfmClient::from_env()?;
    /// let tags = lastfm.track_tags("Slowdive", "Alison").await?;
    /// ```
    pub async fn track_tags(&self, artist: &str, track: &str) -> Result<Vec<Tag>, EraError> {
        let key = format!("track:{}:{}", artist, track);
        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let tags = self
            .top_tags(&[
                ("method", "track.getTopTags"),
                ("artist", artist),
                ("track", track),
            ])
            .await?;
        self.cache.insert(key, tags.clone()).await;
        Ok(tags)
    }

    /// Fetches the top tags of an artist; memoised under `artist:{artist}`.
    pub async fn artist_tags(&self, artist: &str) -> Result<Vec<Tag>, EraError> {
        let key = format!("artist:{}", artist);
        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let tags = self
            .top_tags(&[("method", "artist.getTopTags"), ("artist", artist)])
            .await?;
        self.cache.insert(key, tags.clone()).await;
        Ok(tags)
    }

    async fn top_tags(&self, params: &[(&str, &str)]) -> Result<Vec<Tag>, EraError> {
        let mut attempt = 0;
        loop {
            match self.request(params).await {
                Err(EraError::RateLimited) if attempt < self.retry_delays.len() => {
                    tracing::debug!(attempt, "last.fm rate limited, backing off");
                    sleep(self.retry_delays[attempt]).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn request(&self, params: &[(&str, &str)]) -> Result<Vec<Tag>, EraError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(params)
            .query(&[
                ("autocorrect", "1"),
                ("format", "json"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body = response.text().await?;

        if let Ok(err) = serde_json::from_str::<LastfmErrorResponse>(&body) {
            if err.error != 0 {
                return Err(match err.error {
                    ERR_RATE_LIMITED => EraError::RateLimited,
                    ERR_INVALID_API_KEY => EraError::InvalidApiKey,
                    code => EraError::Api {
                        code,
                        message: err.message,
                    },
                });
            }
        }

        let parsed: TopTagsResponse = serde_json::from_str(&body)?;
        Ok(parsed.toptags.tag)
    }
}

#[async_trait]
impl TagFetcher for LastfmClient {
    async fn fetch_tags(&self, track: &TrackKey) -> Result<FetchedTags, EraError> {
        let tags = self.track_tags(&track.artist, &track.name).await?;
        if !tags.is_empty() {
            return Ok(FetchedTags {
                tags,
                source: TagSource::Primary,
            });
        }

        let tags = self.artist_tags(&track.artist).await?;
        let source = if tags.is_empty() {
            TagSource::None
        } else {
            TagSource::Fallback
        };
        Ok(FetchedTags { tags, source })
    }
}
