use std::collections::HashMap;

use crate::{
    clustering::{TrackObservation, naming, partition},
    error::EraError,
    types::{Era, EraProfile, Track},
};

pub const DEFAULT_NUM_CLUSTERS: usize = 3;
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;
pub const DEFAULT_MAX_TAGS: usize = 50;

const TOP_TAG_COUNT: usize = 3;

/// Parameters of the tag-similarity strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct TagClusterConfig {
    pub num_clusters: usize,
    /// Clusters smaller than this become outliers.
    pub min_cluster_size: usize,
    /// Size of the tag vocabulary, i.e. the vector dimensions.
    pub max_tags: usize,
}

impl Default for TagClusterConfig {
    fn default() -> Self {
        Self {
            num_clusters: DEFAULT_NUM_CLUSTERS,
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
            max_tags: DEFAULT_MAX_TAGS,
        }
    }
}

impl TagClusterConfig {
    pub fn validate(&self) -> Result<(), EraError> {
        if self.num_clusters == 0 {
            return Err(EraError::Config("number of clusters must be positive".into()));
        }
        if self.min_cluster_size == 0 {
            return Err(EraError::Config(
                "minimum cluster size must be positive".into(),
            ));
        }
        if self.max_tags == 0 {
            return Err(EraError::Config("vocabulary size must be positive".into()));
        }
        Ok(())
    }
}

/// A vocabulary term and its weight summed over all tagged tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub name: String,
    pub weight: u64,
}

/// Groups tracks by tag similarity using k-means.
///
/// Tracks without tags are outliers. If fewer tracks carry tags than there
/// are clusters, or k-means fails, every track is an outlier. Eras come back
/// most recent first.
pub fn detect_tag_eras(tracks: &[Track], cfg: &TagClusterConfig) -> (Vec<Era>, Vec<Track>) {
    if tracks.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let num_clusters = if cfg.num_clusters == 0 {
        DEFAULT_NUM_CLUSTERS
    } else {
        cfg.num_clusters
    };
    let max_tags = if cfg.max_tags == 0 {
        DEFAULT_MAX_TAGS
    } else {
        cfg.max_tags
    };

    let (tagged, untagged): (Vec<&Track>, Vec<&Track>) =
        tracks.iter().partition(|t| !t.tags.is_empty());

    let all_outliers = || -> (Vec<Era>, Vec<Track>) {
        let outliers = tagged.iter().chain(untagged.iter()).map(|t| (*t).clone());
        (Vec::new(), outliers.collect())
    };

    if tagged.len() < num_clusters {
        return all_outliers();
    }

    let vocabulary = build_tag_vocabulary(&tagged, max_tags);
    if vocabulary.is_empty() {
        return all_outliers();
    }

    let names: Vec<String> = vocabulary.into_iter().map(|e| e.name).collect();
    let index: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let observations: Vec<TrackObservation<'_>> = tagged
        .iter()
        .map(|t| TrackObservation {
            track: *t,
            coords: build_tag_vector(t, &index),
        })
        .collect();

    let clusters = match partition(&observations, num_clusters) {
        Ok(clusters) => clusters,
        Err(e) => {
            tracing::warn!(error = %e, "k-means over tag vectors failed, treating all tracks as outliers");
            return all_outliers();
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

        let top_tags = extract_top_tags(&cluster.center, &names, TOP_TAG_COUNT);
        let start_date = members[0].added_at;
        let end_date = members[members.len() - 1].added_at;

        eras.push(Era {
            name: naming::era_name(&naming::tag_label(&top_tags), start_date, end_date),
            tracks: members,
            start_date,
            end_date,
            profile: EraProfile::Tags { top_tags },
            split_index: 0,
            split_total: 0,
        });
    }

    outliers.extend(untagged.into_iter().cloned());

    eras.sort_by(|a, b| b.start_date.cmp(&a.start_date));

    (eras, outliers)
}

/// Sums each lower-cased tag's weight over `tracks` and keeps the `max_tags`
/// heaviest names.
///
/// Ties are ordered by name. Names whose total weight is zero carry no
/// signal and are left out.
pub fn build_tag_vocabulary(tracks: &[&Track], max_tags: usize) -> Vec<VocabularyEntry> {
    let mut totals: HashMap<String, u64> = HashMap::new();
    for track in tracks {
        for tag in &track.tags {
            *totals.entry(tag.name.to_lowercase()).or_insert(0) += u64::from(tag.count);
        }
    }

    let mut entries: Vec<VocabularyEntry> = totals
        .into_iter()
        .filter(|(_, weight)| *weight > 0)
        .map(|(name, weight)| VocabularyEntry { name, weight })
        .collect();

    entries.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(max_tags);
    entries
}

/// Projects a track onto the vocabulary, normalising by the track's own
/// heaviest tag so every coordinate is in `0.0..=1.0`.
pub fn build_tag_vector(track: &Track, index: &HashMap<&str, usize>) -> Vec<f64> {
    let max_count = track.tags.iter().map(|t| t.count).max().unwrap_or(0).max(1);

    let mut vector = vec![0.0; index.len()];
    for tag in &track.tags {
        if let Some(&i) = index.get(tag.name.to_lowercase().as_str()) {
            vector[i] = f64::from(tag.count) / f64::from(max_count);
        }
    }
    vector
}

/// Returns up to `n` vocabulary names with the highest strictly positive
/// centroid weight.
pub fn extract_top_tags(centroid: &[f64], vocabulary: &[String], n: usize) -> Vec<String> {
    let mut weighted: Vec<(&String, f64)> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, name)| (name, centroid.get(i).copied().unwrap_or(0.0)))
        .collect();

    weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    weighted
        .into_iter()
        .filter(|(_, w)| *w > 0.0)
        .take(n)
        .map(|(name, _)| name.clone())
        .collect()
}
