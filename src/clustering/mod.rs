//! # Era detection
//!
//! Groups tracks into eras using one of three strategies over the same
//! [`Track`] shape:
//!
//! - [`temporal`] - gap-based partitioning of the add timeline, with
//!   oversized eras split at their own largest internal gaps
//! - [`tags`] - k-means over per-track tag vectors built from a shared
//!   vocabulary
//! - [`mood`] - k-means over audio features
//!
//! Every strategy is a synchronous pure function returning `(eras, outliers)`
//! where each input track lands in exactly one of the two. [`detect`] is the
//! entry point that validates configuration before any work starts.

pub mod display;
pub mod mood;
pub mod naming;
pub mod tags;
pub mod temporal;

use std::collections::HashSet;

use linfa::prelude::*;
use linfa_clustering::KMeans;
use ndarray::{Array1, Array2};

use crate::{
    error::EraError,
    types::{Detection, Track},
};

pub use display::format_era_summary;
pub use mood::{MoodConfig, detect_mood_eras};
pub use tags::{TagClusterConfig, detect_tag_eras};
pub use temporal::{TemporalConfig, detect_eras, split_large_eras};

/// Selects the clustering strategy and carries its configuration.
#[derive(Debug, Clone)]
pub enum Strategy {
    Temporal(TemporalConfig),
    Tags(TagClusterConfig),
    Mood(MoodConfig),
}

impl Strategy {
    /// Checks the configuration of the chosen strategy.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The configuration can be run
    /// - `Err(EraError::Config)` - A gap under one second, or a zero minimum
    ///   size, cluster count or vocabulary size
    pub fn validate(&self) -> Result<(), EraError> {
        match self {
            Strategy::Temporal(cfg) => cfg.validate(),
            Strategy::Tags(cfg) => cfg.validate(),
            Strategy::Mood(cfg) => cfg.validate(),
        }
    }
}

/// Validates the configuration, then runs the chosen strategy.
///
/// Eras come back most recent first. Invalid configuration is rejected
/// before any track is looked at; everything after that point degrades to
/// outliers instead of failing.
pub fn detect(tracks: &[Track], strategy: &Strategy) -> Result<Detection, EraError> {
    strategy.validate()?;

    let (mut eras, outliers) = match strategy {
        Strategy::Temporal(cfg) => {
            let (eras, outliers) = detect_eras(tracks, cfg);
            (split_large_eras(eras, cfg.max_tracks), outliers)
        }
        Strategy::Tags(cfg) => detect_tag_eras(tracks, cfg),
        Strategy::Mood(cfg) => detect_mood_eras(tracks, cfg),
    };

    eras.sort_by(|a, b| b.start_date.cmp(&a.start_date));

    tracing::debug!(
        eras = eras.len(),
        outliers = outliers.len(),
        "era detection finished"
    );

    Ok(Detection { eras, outliers })
}

/// A point that k-means can place in vector space.
pub trait Observation {
    fn coordinates(&self) -> &[f64];

    /// Euclidean distance to `point`.
    fn distance(&self, point: &[f64]) -> f64 {
        self.coordinates()
            .iter()
            .zip(point)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// Wraps a track together with its clustering vector.
#[derive(Debug, Clone)]
pub(crate) struct TrackObservation<'a> {
    pub track: &'a Track,
    pub coords: Vec<f64>,
}

impl Observation for TrackObservation<'_> {
    fn coordinates(&self) -> &[f64] {
        &self.coords
    }
}

/// One k-means group: its center and the observations assigned to it.
#[derive(Debug)]
pub(crate) struct Cluster<'o, O> {
    pub center: Vec<f64>,
    pub members: Vec<&'o O>,
}

/// Partitions observations into `k` groups with k-means.
///
/// Duplicate points are fine. When there are fewer distinct points than
/// `k`, `k` shrinks to the number of distinct points, so identical vectors
/// end up together in one group.
///
/// Fails when there are fewer observations than `k`, when a coordinate is
/// not finite, when the vectors disagree on dimensionality, or when the
/// underlying fit fails.
pub(crate) fn partition<O: Observation>(
    observations: &[O],
    k: usize,
) -> Result<Vec<Cluster<'_, O>>, EraError> {
    if k == 0 || observations.len() < k {
        return Err(EraError::Clustering(format!(
            "cannot build {} clusters from {} observations",
            k,
            observations.len()
        )));
    }

    let dims = observations[0].coordinates().len();
    if dims == 0 {
        return Err(EraError::Clustering("observations have no dimensions".into()));
    }

    let mut distinct: HashSet<Vec<u64>> = HashSet::new();
    let mut data = Vec::with_capacity(observations.len() * dims);
    for obs in observations {
        let coords = obs.coordinates();
        if coords.len() != dims {
            return Err(EraError::Clustering(format!(
                "invalid dimension: expected {}, got {}",
                dims,
                coords.len()
            )));
        }
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(EraError::Clustering("non-finite coordinate".into()));
        }
        // + 0.0 folds -0.0 into 0.0
        distinct.insert(coords.iter().map(|c| (c + 0.0).to_bits()).collect());
        data.extend_from_slice(coords);
    }

    let k = if distinct.len() < k {
        tracing::debug!(
            requested = k,
            distinct = distinct.len(),
            "fewer distinct points than clusters, shrinking k"
        );
        distinct.len()
    } else {
        k
    };

    let records = Array2::from_shape_vec((observations.len(), dims), data)
        .map_err(|e| EraError::Clustering(format!("failed to build matrix: {}", e)))?;
    let dataset = DatasetBase::new(records, Array1::from_elem(observations.len(), ()));

    let model = KMeans::params(k)
        .max_n_iterations(300)
        .tolerance(1e-4)
        .fit(&dataset)
        .map_err(|e| EraError::Clustering(e.to_string()))?;

    let mut clusters: Vec<Cluster<'_, O>> = model
        .centroids()
        .rows()
        .into_iter()
        .map(|row| Cluster {
            center: row.to_vec(),
            members: Vec::new(),
        })
        .collect();

    for obs in observations {
        let mut best: Option<(usize, f64)> = None;
        for (idx, cluster) in clusters.iter().enumerate() {
            let d = obs.distance(&cluster.center);
            if d.is_nan() {
                return Err(EraError::Clustering("distance is not a number".into()));
            }
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((idx, d));
            }
        }
        if let Some((idx, _)) = best {
            clusters[idx].members.push(obs);
        }
    }

    Ok(clusters)
}
