use std::collections::BTreeMap;

use crate::{
    clustering::{TrackObservation, naming, partition},
    error::EraError,
    types::{Era, EraProfile, Track},
};

pub const DEFAULT_NUM_CLUSTERS: usize = 3;
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;

/// Audio features used as vector dimensions, in coordinate order.
pub const FEATURE_NAMES: [&str; 4] = ["energy", "valence", "danceability", "acousticness"];

#[derive(Debug, Clone, PartialEq)]
pub struct MoodConfig {
    pub num_clusters: usize,
    pub min_cluster_size: usize,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            num_clusters: DEFAULT_NUM_CLUSTERS,
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
        }
    }
}

impl MoodConfig {
    pub fn validate(&self) -> Result<(), EraError> {
        if self.num_clusters == 0 {
            return Err(EraError::Config("number of clusters must be positive".into()));
        }
        if self.min_cluster_size == 0 {
            return Err(EraError::Config(
                "minimum cluster size must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Groups tracks by audio-feature similarity using k-means.
///
/// Tracks missing any of the four features are outliers. Each era carries
/// its centroid and a mood name derived from it.
pub fn detect_mood_eras(tracks: &[Track], cfg: &MoodConfig) -> (Vec<Era>, Vec<Track>) {
    if tracks.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let num_clusters = if cfg.num_clusters == 0 {
        DEFAULT_NUM_CLUSTERS
    } else {
        cfg.num_clusters
    };

    let mut valid = Vec::new();
    let mut missing = Vec::new();
    for track in tracks {
        match extract_features(track) {
            Some(coords) => valid.push(TrackObservation { track, coords }),
            None => missing.push(track.clone()),
        }
    }

    let all_outliers = |valid: &[TrackObservation<'_>], missing: Vec<Track>| {
        let mut outliers: Vec<Track> = valid.iter().map(|o| o.track.clone()).collect();
        outliers.extend(missing);
        (Vec::new(), outliers)
    };

    if valid.len() < num_clusters {
        return all_outliers(&valid, missing);
    }

    let clusters = match partition(&valid, num_clusters) {
        Ok(clusters) => clusters,
        Err(e) => {
            tracing::warn!(error = %e, "k-means over audio features failed, treating all tracks as outliers");
            return all_outliers(&valid, missing);
        }
    };

    let mut eras = Vec::new();
    let mut outliers = Vec::new();

    for cluster in clusters {
        let mut members: Vec<Track> = cluster.members.iter().map(|o| o.track.clone()).collect();

        if members.len() < cfg.min_cluster_size.max(1) {
            outliers.extend(members);
            continue;
        }

        members.sort_by(|a, b| a.added_at.cmp(&b.added_at));

        let centroid: BTreeMap<String, f32> = FEATURE_NAMES
            .iter()
            .zip(&cluster.center)
            .map(|(name, value)| (name.to_string(), *value as f32))
            .collect();

        let start_date = members[0].added_at;
        let end_date = members[members.len() - 1].added_at;

        eras.push(Era {
            name: naming::era_name(&naming::mood_name(&centroid), start_date, end_date),
            tracks: members,
            start_date,
            end_date,
            profile: EraProfile::Mood { centroid },
            split_index: 0,
            split_total: 0,
        });
    }

    outliers.extend(missing);

    eras.sort_by(|a, b| b.start_date.cmp(&a.start_date));

    (eras, outliers)
}

pub fn has_audio_features(track: &Track) -> bool {
    extract_features(track).is_some()
}

/// Returns the track's features in [`FEATURE_NAMES`] order, or `None` when
/// any of them is missing.
pub fn extract_features(track: &Track) -> Option<Vec<f64>> {
    Some(vec![
        f64::from(track.energy?),
        f64::from(track.valence?),
        f64::from(track.danceability?),
        f64::from(track.acousticness?),
    ])
}
