use std::{collections::VecDeque, sync::Arc};

use tokio::{sync::Mutex, task::JoinSet};
use tokio_util::sync::CancellationToken;

use crate::{
    error::EraError,
    tags::TagFetcher,
    types::{Tag, TagSource, TrackKey},
};

/// Number of concurrent fetches when none is configured.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// The tags fetched for one track.
#[derive(Debug)]
pub struct TrackTags {
    pub track_id: String,
    pub tags: Vec<Tag>,
    pub source: TagSource,
    /// Set if fetching failed; `tags` is then empty and `source` is `None`.
    pub error: Option<EraError>,
}

impl TrackTags {
    fn failed(track_id: String, error: EraError) -> Self {
        Self {
            track_id,
            tags: Vec::new(),
            source: TagSource::None,
            error: Some(error),
        }
    }
}

/// One result per input track, in input order, plus the batch-level error.
///
/// `error` is only ever [`EraError::Cancelled`]; the results are still
/// meaningful in that case and hold every fetch that completed.
#[derive(Debug)]
pub struct BatchResult {
    pub results: Vec<TrackTags>,
    pub error: Option<EraError>,
}

impl BatchResult {
    pub fn is_cancelled(&self) -> bool {
        self.error.as_ref().is_some_and(EraError::is_cancelled)
    }
}

/// Fetches tags for batches of tracks with a bounded worker pool.
#[derive(Clone)]
pub struct TagService {
    fetcher: Arc<dyn TagFetcher>,
    concurrency: usize,
}

impl TagService {
    pub fn new(fetcher: Arc<dyn TagFetcher>) -> Self {
        Self {
            fetcher,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets the number of concurrent fetches; 0 keeps the current value.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        if concurrency > 0 {
            self.concurrency = concurrency;
        }
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetches tags for every track, returning results in input order.
    ///
    /// A failed fetch is recorded in that track's result and never aborts
    /// the batch. Tracks picked up after `cancel` fired are not fetched and
    /// carry [`EraError::Cancelled`].
    pub async fn fetch_tags_for_tracks(
        &self,
        tracks: &[TrackKey],
        cancel: &CancellationToken,
    ) -> BatchResult {
        if tracks.is_empty() {
            return BatchResult {
                results: Vec::new(),
                error: None,
            };
        }

        let queue: VecDeque<(usize, TrackKey)> = tracks.iter().cloned().enumerate().collect();
        let queue = Arc::new(Mutex::new(queue));

        let workers = self.concurrency.min(tracks.len());
        let mut set = JoinSet::new();

        for _ in 0..workers {
            let queue = Arc::clone(&queue);
            let fetcher = Arc::clone(&self.fetcher);
            let cancel = cancel.clone();

            set.spawn(async move {
                let mut done: Vec<(usize, TrackTags)> = Vec::new();
                loop {
                    let next = queue.lock().await.pop_front();
                    let Some((index, track)) = next else {
                        break;
                    };

                    if cancel.is_cancelled() {
                        done.push((index, TrackTags::failed(track.id, EraError::Cancelled)));
                        continue;
                    }

                    let result = match fetcher.fetch_tags(&track).await {
                        Ok(fetched) if fetched.tags.is_empty() => TrackTags {
                            track_id: track.id,
                            tags: Vec::new(),
                            source: TagSource::None,
                            error: None,
                        },
                        Ok(fetched) => TrackTags {
                            track_id: track.id,
                            tags: fetched.tags,
                            source: fetched.source,
                            error: None,
                        },
                        Err(e) => {
                            tracing::debug!(track_id = %track.id, error = %e, "tag fetch failed");
                            TrackTags::failed(track.id, e)
                        }
                    };
                    done.push((index, result));
                }
                done
            });
        }

        let mut slots: Vec<Option<TrackTags>> = tracks.iter().map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(done) => {
                    for (index, result) in done {
                        slots[index] = Some(result);
                    }
                }
                Err(e) => tracing::warn!(error = %e, "tag worker did not finish"),
            }
        }

        let results = slots
            .into_iter()
            .zip(tracks)
            .map(|(slot, track)| {
                slot.unwrap_or_else(|| {
                    TrackTags::failed(
                        track.id.clone(),
                        EraError::Worker("no result recorded".into()),
                    )
                })
            })
            .collect();

        let error = cancel.is_cancelled().then_some(EraError::Cancelled);

        tracing::debug!(
            tracks = tracks.len(),
            workers,
            cancelled = error.is_some(),
            "tag batch finished"
        );

        BatchResult { results, error }
    }
}
