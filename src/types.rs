use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A saved track with its add timestamp, tags and optional audio features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valence: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danceability: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acousticness: Option<f32>,
}

impl Track {
    pub fn new(id: &str, name: &str, artist: &str, added_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            artist: artist.to_string(),
            added_at,
            tags: Vec::new(),
            energy: None,
            valence: None,
            danceability: None,
            acousticness: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn key(&self) -> TrackKey {
        TrackKey {
            id: self.id.clone(),
            name: self.name.clone(),
            artist: self.artist.clone(),
        }
    }
}

/// The minimal track info needed for a tag lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey {
    pub id: String,
    pub name: String,
    pub artist: String,
}

/// A tag with its popularity weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

impl Tag {
    pub fn new(name: &str, count: u32) -> Self {
        Self {
            name: name.to_string(),
            count,
        }
    }
}

/// Where a track's tags came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSource {
    /// Tags of the track itself.
    Primary,
    /// Tags of the track's artist, used when the track had none.
    Fallback,
    None,
}

/// What distinguishes the members of an era from the rest of the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EraProfile {
    Temporal,
    Tags { top_tags: Vec<String> },
    Mood { centroid: BTreeMap<String, f32> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Era {
    pub name: String,
    pub tracks: Vec<Track>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub profile: EraProfile,
    /// 1-based position among the sub-eras of a split era, 0 if not split.
    #[serde(default)]
    pub split_index: usize,
    /// Number of sibling sub-eras, 0 if not split.
    #[serde(default)]
    pub split_total: usize,
}

impl Era {
    pub fn top_tags(&self) -> &[String] {
        match &self.profile {
            EraProfile::Tags { top_tags } => top_tags,
            _ => &[],
        }
    }

    pub fn is_split(&self) -> bool {
        self.split_total > 0
    }
}

/// The outcome of one clustering pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub eras: Vec<Era>,
    pub outliers: Vec<Track>,
}

impl Detection {
    pub fn total_tracks(&self) -> usize {
        self.outliers.len() + self.eras.iter().map(|e| e.tracks.len()).sum::<usize>()
    }
}

#[derive(Tabled)]
pub struct EraTableRow {
    pub name: String,
    pub start: String,
    pub end: String,
    pub tracks: usize,
    pub part: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTracksResponse {
    pub items: Vec<SavedTrack>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrack {
    pub added_at: String,
    pub track: SpotifyTrack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    pub energy: f32,
    pub valence: f32,
    pub danceability: f32,
    pub acousticness: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTagsResponse {
    pub toptags: TopTags,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTags {
    #[serde(default)]
    pub tag: Vec<Tag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastfmErrorResponse {
    pub error: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistResponse {
    pub snapshot_id: String,
}
