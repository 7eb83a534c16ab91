use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::types::EraProfile;

const NAME_DATE_FORMAT: &str = "%b %-d, %Y";

/// Label used for tag eras whose centroid has no positive tag weight.
pub const MIXED_LABEL: &str = "Mixed";

/// Builds a display name such as `"rock & indie: Jan 15, 2024 - Feb 3, 2024"`.
///
/// When both dates format to the same day only one date is shown.
pub fn era_name(label: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let start_str = start.format(NAME_DATE_FORMAT).to_string();
    let end_str = end.format(NAME_DATE_FORMAT).to_string();

    if start_str == end_str {
        format!("{}: {}", label, start_str)
    } else {
        format!("{}: {} - {}", label, start_str, end_str)
    }
}

/// Joins the top tags of a tag era with `" & "`.
///
/// # Arguments
///
/// * `top_tags` - The era's strongest tags, strongest first
///
/// # Returns
///
/// The joined tags, or [`MIXED_LABEL`] when there are none.
///
/// # Example
///
/// ```
/// let label = tag_label(&["rock".to_string(), "indie".to_string()]);
/// assert_eq!(label, "rock & indie");
/// ```
pub fn tag_label(top_tags: &[String]) -> String {
    if top_tags.is_empty() {
        MIXED_LABEL.to_string()
    } else {
        top_tags.join(" & ")
    }
}

/// Label of a temporal era, with the part marker when it was split.
///
/// # Arguments
///
/// * `split_index` - 1-based position of the sub-era, ignored when not split
/// * `split_total` - Number of sub-eras, `0` for an era that was not split
///
/// # Returns
///
/// `"Added"` or `"Added (part i/n)"`.
///
/// # Example
///
/// ```
/// assert_eq!(temporal_label(2, 3), "Added (part 2/3)");
/// ```
pub fn temporal_label(split_index: usize, split_total: usize) -> String {
    part_label(TEMPORAL_LABEL, split_index, split_total)
}

/// Label of a temporal era before any part marker.
pub const TEMPORAL_LABEL: &str = "Added";

/// The label an era's profile stands for, without dates or part marker.
pub fn profile_base_label(profile: &EraProfile) -> String {
    match profile {
        EraProfile::Temporal => TEMPORAL_LABEL.to_string(),
        EraProfile::Tags { top_tags } => tag_label(top_tags),
        EraProfile::Mood { centroid } => mood_name(centroid),
    }
}

/// Appends `" (part i/n)"` to `base` for sub-eras; `split_total == 0` means
/// the era was not split and `base` is returned as is.
pub fn part_label(base: &str, split_index: usize, split_total: usize) -> String {
    if split_total > 0 {
        format!("{} (part {}/{})", base, split_index, split_total)
    } else {
        base.to_string()
    }
}

/// Names a mood centroid from its energy/valence quadrant.
///
/// High energy is above 0.6, high valence above 0.5. Acousticness above 0.6
/// appends `" (Acoustic)"`.
pub fn mood_name(centroid: &BTreeMap<String, f32>) -> String {
    let energy = feature(centroid, "energy");
    let valence = feature(centroid, "valence");
    let acousticness = feature(centroid, "acousticness");

    let base = match (energy > 0.6, valence > 0.5) {
        (true, true) => "Upbeat Party",
        (true, false) => "Intense & Dark",
        (false, true) => "Chill & Happy",
        (false, false) => "Reflective & Melancholy",
    };

    if acousticness > 0.6 {
        format!("{} (Acoustic)", base)
    } else {
        base.to_string()
    }
}

/// A mood classification with a short description, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodCategory {
    pub name: String,
    pub energy: f32,
    pub valence: f32,
    pub description: &'static str,
}

pub fn mood_category(centroid: &BTreeMap<String, f32>) -> MoodCategory {
    let energy = feature(centroid, "energy");
    let valence = feature(centroid, "valence");

    let description = match (energy > 0.6, valence > 0.5) {
        (true, true) => "High-energy, positive vibes - perfect for dancing and celebrations",
        (true, false) => "Intense, driving energy with darker emotional tones",
        (false, true) => "Relaxed and uplifting - great for unwinding",
        (false, false) => "Contemplative and introspective - ideal for quiet moments",
    };

    MoodCategory {
        name: mood_name(centroid),
        energy,
        valence,
        description,
    }
}

fn feature(centroid: &BTreeMap<String, f32>, name: &str) -> f32 {
    centroid.get(name).copied().unwrap_or(0.0)
}
