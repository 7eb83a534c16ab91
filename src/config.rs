//! Configuration for eracli.
//!
//! Values are read from environment variables. Before anything else runs,
//! [`load_env`] loads a `.env` file from the local data directory so the
//! credentials do not have to be exported in every shell:
//!
//! - Linux: `~/.local/share/eracli/.env`
//! - macOS: `~/Library/Application Support/eracli/.env`
//! - Windows: `%LOCALAPPDATA%/eracli/.env`
//!
//! Variables already present in the environment win over the file.

use std::{env, path::PathBuf};

use crate::error::EraError;

pub const APP_DIR: &str = "eracli";

pub const DEFAULT_LASTFM_API_URL: &str = "http://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// The application's directory below the platform data dir.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

pub fn env_path() -> PathBuf {
    data_dir().join(".env")
}

/// Creates the data directory and loads `.env` from it if present.
///
/// A missing file is not an error; the environment may already carry
/// everything that is needed.
pub async fn load_env() -> Result<(), EraError> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded environment file");
            Ok(())
        }
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no environment file");
            Ok(())
        }
        Err(e) => Err(EraError::Config(format!(
            "could not load {}: {}",
            path.display(),
            e
        ))),
    }
}

fn required(name: &str) -> Result<String, EraError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(EraError::MissingEnv(name.to_string())),
    }
}

fn with_default(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// `LASTFM_API_KEY`, needed for tag lookups.
pub fn lastfm_api_key() -> Result<String, EraError> {
    required("LASTFM_API_KEY")
}

/// `LASTFM_API_URL`, defaults to the public endpoint.
pub fn lastfm_api_url() -> String {
    with_default("LASTFM_API_URL", DEFAULT_LASTFM_API_URL)
}

/// `SPOTIFY_ACCESS_TOKEN`, a user token with the `user-library-read` scope
/// and, for `eras playlists`, `playlist-modify-private`.
pub fn spotify_token() -> Result<String, EraError> {
    required("SPOTIFY_ACCESS_TOKEN")
}

/// `SPOTIFY_API_URL`, defaults to the Web API v1 base.
pub fn spotify_apiurl() -> String {
    with_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}
