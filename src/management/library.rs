use std::{collections::HashMap, path::PathBuf};

use crate::{config, error::EraError, types::Track};

/// The locally cached copy of the user's saved tracks.
pub struct LibraryManager {
    path: PathBuf,
    tracks: Vec<Track>,
}

impl LibraryManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            tracks: Vec::new(),
        }
    }

    /// Loads the library from `path`; a missing file yields an empty library.
    pub async fn load(path: PathBuf) -> Result<Self, EraError> {
        let tracks = match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, tracks })
    }

    pub async fn load_default() -> Result<Self, EraError> {
        Self::load(Self::default_path()).await
    }

    pub async fn persist(&self) -> Result<(), EraError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&self.tracks)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Replaces the library with a fresh fetch.
    ///
    /// Tags and audio features already known for a track id are carried
    /// over unless the fetched track brings its own. Returns how many of the
    /// fetched tracks were not in the library before.
    pub fn merge(&mut self, fetched: Vec<Track>) -> usize {
        let mut known: HashMap<String, Track> = self
            .tracks
            .drain(..)
            .map(|t| (t.id.clone(), t))
            .collect();

        let mut added = 0;
        self.tracks = fetched
            .into_iter()
            .map(|mut track| {
                match known.remove(&track.id) {
                    Some(old) => {
                        if track.tags.is_empty() {
                            track.tags = old.tags;
                        }
                        track.energy = track.energy.or(old.energy);
                        track.valence = track.valence.or(old.valence);
                        track.danceability = track.danceability.or(old.danceability);
                        track.acousticness = track.acousticness.or(old.acousticness);
                    }
                    None => added += 1,
                }
                track
            })
            .collect();
        added
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn tracks_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    pub fn count_tagged(&self) -> usize {
        self.tracks.iter().filter(|t| !t.tags.is_empty()).count()
    }

    pub fn count_with_audio_features(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| crate::clustering::mood::has_audio_features(t))
            .count()
    }

    pub fn default_path() -> PathBuf {
        config::data_dir().join("cache").join("library.json")
    }
}
