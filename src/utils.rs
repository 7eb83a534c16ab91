use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::{
    clustering::{display::profile_label, naming},
    types::{CreatePlaylistRequest, Era, EraProfile, EraTableRow, SavedTrack, Tag, Track},
};

const PLAYLIST_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Parses a Spotify `added_at` timestamp (RFC 3339).
pub fn parse_added_at(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Converts a saved track from the Web API into a [`Track`].
///
/// Local files have no id and are skipped. An unparsable timestamp falls
/// back to the Unix epoch so the track still takes part in clustering.
pub fn convert_saved_track(saved: SavedTrack) -> Option<Track> {
    let id = saved.track.id?;
    let added_at = parse_added_at(&saved.added_at).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    let artist = saved
        .track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Some(Track::new(&id, &saved.track.name, &artist, added_at))
}

/// Attaches fetched tags to the matching tracks; tracks without an entry
/// keep their current tags.
pub fn apply_tags(tracks: &mut [Track], tags: &HashMap<String, Vec<Tag>>) -> usize {
    let mut applied = 0;
    for track in tracks.iter_mut() {
        if let Some(found) = tags.get(&track.id) {
            track.tags = found.clone();
            applied += 1;
        }
    }
    applied
}

pub fn era_table_rows(eras: &[Era]) -> Vec<EraTableRow> {
    eras.iter()
        .map(|era| EraTableRow {
            name: profile_label(era).unwrap_or_else(|| "Added".to_string()),
            start: era.start_date.format("%Y-%m-%d").to_string(),
            end: era.end_date.format("%Y-%m-%d").to_string(),
            tracks: era.tracks.len(),
            part: if era.is_split() {
                format!("{}/{}", era.split_index, era.split_total)
            } else {
                String::new()
            },
        })
        .collect()
}

/// Value parser for counts that must be at least one.
pub fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("value must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid number '{}': {}", value, e)),
    }
}

/// Value parser for counts where `0` is meaningful, e.g. "no limit".
pub fn parse_count(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|e| format!("invalid number '{}': {}", value, e))
}

/// Value parser for a gap threshold given in (possibly fractional) days.
pub fn parse_gap_days(value: &str) -> Result<Duration, String> {
    let days: f64 = value
        .parse()
        .map_err(|e| format!("invalid number of days '{}': {}", value, e))?;
    if !days.is_finite() || days <= 0.0 {
        return Err("gap must be a positive number of days".to_string());
    }

    let seconds = (days * 86_400.0).round() as i64;
    if seconds < 1 {
        return Err("gap must be at least one second".to_string());
    }
    Duration::try_seconds(seconds).ok_or_else(|| "gap is too large".to_string())
}

/// Keeps the first `limit` eras; `0` keeps all of them.
pub fn limit_eras(eras: &[Era], limit: usize) -> &[Era] {
    if limit > 0 && eras.len() > limit {
        &eras[..limit]
    } else {
        eras
    }
}

/// Spotify track URIs for `tracks`, in order.
pub fn track_uris(tracks: &[Track]) -> Vec<String> {
    tracks
        .iter()
        .map(|t| format!("spotify:track:{}", t.id))
        .collect()
}

/// Describes an era for its playlist: the mood description or top tags
/// followed by the date range.
pub fn playlist_description(era: &Era) -> String {
    let range = format!(
        "{} to {}",
        era.start_date.format(PLAYLIST_DATE_FORMAT),
        era.end_date.format(PLAYLIST_DATE_FORMAT)
    );

    match &era.profile {
        EraProfile::Temporal => format!("Tracks added from {}.", range),
        EraProfile::Tags { top_tags } if top_tags.is_empty() => {
            format!("Mixed tags, added from {}.", range)
        }
        EraProfile::Tags { top_tags } => {
            format!("Top tags: {}. Added from {}.", top_tags.join(", "), range)
        }
        EraProfile::Mood { centroid } => format!(
            "{}. Added from {}.",
            naming::mood_category(centroid).description,
            range
        ),
    }
}

/// The private playlist an era is written to, named after the era.
pub fn era_playlist_request(era: &Era) -> CreatePlaylistRequest {
    CreatePlaylistRequest {
        name: era.name.clone(),
        description: playlist_description(era),
        public: false,
        collaborative: false,
    }
}
