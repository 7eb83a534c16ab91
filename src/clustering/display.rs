use std::fmt::Write;

use crate::{
    clustering::naming,
    types::{Era, EraProfile, Track},
    utils,
};

const SAMPLE_TRACK_COUNT: usize = 3;
const SUMMARY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Renders a human-readable summary of detected eras.
///
/// Shows each era's date range, track count and first three tracks.
/// Outliers are summarised by count only.
pub fn format_era_summary(eras: &[Era], outliers: &[Track]) -> String {
    let total_tracks = outliers.len() + eras.iter().map(|e| e.tracks.len()).sum::<usize>();
    let mut out = String::new();

    if eras.is_empty() {
        let _ = write!(out, "No eras found from {} tracks", total_tracks);
    } else {
        let _ = write!(
            out,
            "Found {} {} from {} tracks",
            eras.len(),
            utils::plural(eras.len(), "era", "eras"),
            total_tracks
        );
    }

    if !outliers.is_empty() {
        let _ = write!(
            out,
            " ({} {} skipped)",
            outliers.len(),
            utils::plural(outliers.len(), "outlier", "outliers")
        );
    }
    out.push('\n');

    for (i, era) in eras.iter().enumerate() {
        out.push('\n');
        out.push_str(&format_era(i + 1, era));
    }

    out
}

fn format_era(num: usize, era: &Era) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "Era {}: {} to {} ({} {})",
        num,
        era.start_date.format(SUMMARY_DATE_FORMAT),
        era.end_date.format(SUMMARY_DATE_FORMAT),
        era.tracks.len(),
        utils::plural(era.tracks.len(), "track", "tracks")
    );
    if let Some(label) = profile_label(era) {
        let _ = write!(out, " - {}", label);
    }
    out.push('\n');

    for track in era.tracks.iter().take(SAMPLE_TRACK_COUNT) {
        let _ = writeln!(out, "  • \"{}\" - {}", track.name, track.artist);
    }

    let remaining = era.tracks.len().saturating_sub(SAMPLE_TRACK_COUNT);
    if remaining > 0 {
        let _ = writeln!(out, "  ... and {} more", remaining);
    }

    out
}

/// The label that describes an era beyond its dates, if any.
///
/// Temporal eras have none; tag and mood eras return their tag or mood
/// label.
pub fn profile_label(era: &Era) -> Option<String> {
    match &era.profile {
        EraProfile::Temporal => None,
        profile => Some(naming::profile_base_label(profile)),
    }
}
