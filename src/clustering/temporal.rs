use chrono::Duration;

use crate::{
    clustering::naming,
    error::EraError,
    types::{Era, EraProfile, Track},
};

pub const DEFAULT_GAP_DAYS: i64 = 7;
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;
pub const DEFAULT_MAX_TRACKS: usize = 30;

/// Parameters of the gap-based strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalConfig {
    /// Minimum gap between consecutive adds that starts a new era.
    pub gap_threshold: Duration,
    /// Runs smaller than this become outliers.
    pub min_cluster_size: usize,
    /// Maximum tracks per era; 0 disables splitting.
    pub max_tracks: usize,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            gap_threshold: Duration::days(DEFAULT_GAP_DAYS),
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
            max_tracks: DEFAULT_MAX_TRACKS,
        }
    }
}

impl TemporalConfig {
    pub fn validate(&self) -> Result<(), EraError> {
        if self.gap_threshold < Duration::seconds(1) {
            return Err(EraError::Config(format!(
                "gap threshold must be at least one second, got {}s",
                self.gap_threshold.num_seconds()
            )));
        }
        if self.min_cluster_size == 0 {
            return Err(EraError::Config(
                "minimum cluster size must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Groups tracks into eras wherever consecutive adds are closer than the gap
/// threshold.
///
/// Works on a sorted copy of `tracks`. A gap exactly equal to the threshold
/// starts a new era. Runs smaller than `min_cluster_size` are returned whole
/// as outliers. Eras come back in chronological order.
pub fn detect_eras(tracks: &[Track], cfg: &TemporalConfig) -> (Vec<Era>, Vec<Track>) {
    if tracks.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut sorted = tracks.to_vec();
    sorted.sort_by(|a, b| a.added_at.cmp(&b.added_at));

    let mut runs: Vec<Vec<Track>> = Vec::new();
    let mut current: Vec<Track> = Vec::new();

    for track in sorted {
        if let Some(last) = current.last() {
            if track.added_at - last.added_at >= cfg.gap_threshold {
                runs.push(std::mem::take(&mut current));
            }
        }
        current.push(track);
    }
    runs.push(current);

    let mut eras = Vec::new();
    let mut outliers = Vec::new();

    for run in runs {
        if run.len() >= cfg.min_cluster_size {
            eras.push(build_era(run, EraProfile::Temporal, 0, 0));
        } else {
            outliers.extend(run);
        }
    }

    (eras, outliers)
}

/// Splits every era holding more than `max_tracks` tracks into sub-eras.
///
/// Cut points are the largest gaps inside the era, so a burst of adds is
/// never cut in half when a quieter stretch exists. Sub-eras keep the
/// profile of the era they came from and are named after its label with a
/// `(part i/n)` marker. Eras under the limit pass through untouched and keep
/// their position.
///
/// # Arguments
///
/// * `eras` - Eras whose tracks are sorted by `added_at`
/// * `max_tracks` - Size above which an era is split; `0` disables splitting
///
/// # Returns
///
/// The eras in their original order, with every oversized era replaced in
/// place by its sub-eras.
///
/// # Example
///
/// ```
/// let (eras, _) = detect_eras(&tracks, &TemporalConfig::default());
/// let eras = split_large_eras(eras, 30);
/// ```
pub fn split_large_eras(eras: Vec<Era>, max_tracks: usize) -> Vec<Era> {
    if max_tracks == 0 {
        return eras;
    }

    let mut result = Vec::with_capacity(eras.len());
    for era in eras {
        if era.tracks.len() <= max_tracks {
            result.push(era);
        } else {
            result.extend(split_era(era, max_tracks));
        }
    }
    result
}

fn split_era(era: Era, max_tracks: usize) -> Vec<Era> {
    let total = era.tracks.len();
    let num_sub_eras = total.div_ceil(max_tracks);
    let num_splits = num_sub_eras - 1;

    if num_splits == 0 {
        return vec![era];
    }

    // (index of the track after the gap, gap length)
    let mut gaps: Vec<(usize, Duration)> = era
        .tracks
        .windows(2)
        .enumerate()
        .map(|(i, pair)| (i + 1, pair[1].added_at - pair[0].added_at))
        .collect();

    // stable sort keeps earlier gaps first among equals
    gaps.sort_by(|a, b| b.1.cmp(&a.1));

    let mut cuts: Vec<usize> = gaps.iter().take(num_splits).map(|(idx, _)| *idx).collect();
    cuts.sort_unstable();
    cuts.push(total);

    let Era {
        tracks, profile, ..
    } = era;

    let mut sub_eras = Vec::with_capacity(num_sub_eras);
    let mut start = 0;
    for (i, end) in cuts.into_iter().enumerate() {
        let chunk = tracks[start..end].to_vec();
        sub_eras.push(build_era(chunk, profile.clone(), i + 1, num_sub_eras));
        start = end;
    }

    sub_eras
}

fn build_era(tracks: Vec<Track>, profile: EraProfile, split_index: usize, split_total: usize) -> Era {
    let start_date = tracks[0].added_at;
    let end_date = tracks[tracks.len() - 1].added_at;
    let label = naming::part_label(
        &naming::profile_base_label(&profile),
        split_index,
        split_total,
    );

    Era {
        name: naming::era_name(&label, start_date, end_date),
        tracks,
        start_date,
        end_date,
        profile,
        split_index,
        split_total,
    }
}
