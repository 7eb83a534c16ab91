use chrono::{Duration, Utc};
use clap::ValueEnum;
use tabled::Table;

use crate::{
    clustering::{self, MoodConfig, Strategy, TagClusterConfig, TemporalConfig},
    error, info,
    management::{EraManager, LibraryManager, SavedDetection},
    success,
    types::Detection,
    utils, warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Split the add timeline at long gaps
    Temporal,
    /// Group by Last.fm tag similarity
    Tags,
    /// Group by Spotify audio features
    Mood,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Temporal => "temporal",
            StrategyKind::Tags => "tags",
            StrategyKind::Mood => "mood",
        }
    }
}

/// Flags of `eras detect`; unset values fall back to the strategy defaults.
#[derive(Debug, Clone)]
pub struct DetectOptions {
    pub strategy: StrategyKind,
    pub gap: Option<Duration>,
    pub min_size: Option<usize>,
    pub max_tracks: Option<usize>,
    pub clusters: Option<usize>,
    pub max_tags: Option<usize>,
    pub table: bool,
}

impl DetectOptions {
    pub fn to_strategy(&self) -> Strategy {
        match self.strategy {
            StrategyKind::Temporal => {
                let d = TemporalConfig::default();
                Strategy::Temporal(TemporalConfig {
                    gap_threshold: self.gap.unwrap_or(d.gap_threshold),
                    min_cluster_size: self.min_size.unwrap_or(d.min_cluster_size),
                    max_tracks: self.max_tracks.unwrap_or(d.max_tracks),
                })
            }
            StrategyKind::Tags => {
                let d = TagClusterConfig::default();
                Strategy::Tags(TagClusterConfig {
                    num_clusters: self.clusters.unwrap_or(d.num_clusters),
                    min_cluster_size: self.min_size.unwrap_or(d.min_cluster_size),
                    max_tags: self.max_tags.unwrap_or(d.max_tags),
                })
            }
            StrategyKind::Mood => {
                let d = MoodConfig::default();
                Strategy::Mood(MoodConfig {
                    num_clusters: self.clusters.unwrap_or(d.num_clusters),
                    min_cluster_size: self.min_size.unwrap_or(d.min_cluster_size),
                })
            }
        }
    }
}

/// Runs era detection over the cached library, prints and saves the result.
pub async fn detect_eras(opts: DetectOptions) {
    let library = match LibraryManager::load_default().await {
        Ok(lib) => lib,
        Err(e) => error!("Cannot load library cache. Err: {}", e),
    };
    if library.count() == 0 {
        warning!("Library is empty. Run `eracli library sync` first.");
        return;
    }

    match opts.strategy {
        StrategyKind::Tags if library.count_tagged() == 0 => {
            warning!("No track has tags yet. Run `eracli tags update` first.")
        }
        StrategyKind::Mood if library.count_with_audio_features() == 0 => warning!(
            "No track has audio features. Run `eracli library sync --audio-features` first."
        ),
        _ => {}
    }

    let detection = match clustering::detect(library.tracks(), &opts.to_strategy()) {
        Ok(d) => d,
        Err(e) => error!("Cannot detect eras. Err: {}", e),
    };

    print_detection(&detection, opts.table);

    let saved = SavedDetection {
        strategy: opts.strategy.as_str().to_string(),
        detected_at: Utc::now(),
        detection,
    };
    if let Err(e) = EraManager::at_default_path().persist(&saved).await {
        warning!("Could not save detected eras. Err: {}", e);
        return;
    }
    success!("Saved {} eras.", saved.detection.eras.len());
}

/// Prints the last saved detection.
pub async fn show_eras(table: bool) {
    match EraManager::at_default_path().load().await {
        Ok(Some(saved)) => {
            info!(
                "Detected with the {} strategy on {}.",
                saved.strategy,
                saved.detected_at.format("%Y-%m-%d %H:%M")
            );
            print_detection(&saved.detection, table);
        }
        Ok(None) => warning!("No eras saved yet. Run `eracli eras detect` first."),
        Err(e) => error!("Cannot load saved eras. Err: {}", e),
    }
}

fn print_detection(detection: &Detection, table: bool) {
    if table && !detection.eras.is_empty() {
        println!("{}", Table::new(utils::era_table_rows(&detection.eras)));
        if !detection.outliers.is_empty() {
            info!(
                "{} {} not assigned to any era.",
                detection.outliers.len(),
                utils::plural(detection.outliers.len(), "track", "tracks")
            );
        }
    } else {
        print!(
            "{}",
            clustering::format_era_summary(&detection.eras, &detection.outliers)
        );
    }
}
