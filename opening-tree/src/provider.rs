use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

/// One continuation reported by the statistics provider for a line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub notation: String,
    /// Number of games the continuation was played in. `None` when the provider shows no count.
    pub played: Option<u64>,
    /// Side-to-move result percentages in the provider's display order.
    pub percentages: Vec<u32>,
}

impl Candidate {
    pub fn new(notation: impl Into<String>, played: Option<u64>, percentages: Vec<u32>) -> Self {
        Self {
            notation: notation.into(),
            played,
            percentages,
        }
    }
}

/// Source of move statistics for a line of play.
///
/// `path` is the line's moves joined with `+`, empty for the starting position. The returned
/// candidates are ordered by descending play count.
pub trait StatisticsProvider: Send + Sync {
    type Future: Future<Output = Result<Vec<Candidate>>> + Send + 'static;

    fn query(&self, path: &str, ply: usize) -> Self::Future;
}

impl<P: StatisticsProvider> StatisticsProvider for Arc<P> {
    type Future = P::Future;

    fn query(&self, path: &str, ply: usize) -> Self::Future {
        (**self).query(path, ply)
    }
}
