use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::{
    CrawlOptions, LineFetcher, MoveSequence, OpeningTree, PlyCache, PlySnapshot,
    SignificanceFilter, StatisticsProvider,
};

/// Breadth first crawl of the opening tree, one ply at a time.
///
/// Each ply is either taken from the cache as is, or resolved by fanning out one fetch per
/// frontier line over a bounded pool and persisted before the next ply starts.
pub struct TreeOrchestrator<P> {
    fetcher: Arc<LineFetcher<P>>,
    cache: PlyCache,
    options: CrawlOptions,
}

struct Resolved {
    snapshot: PlySnapshot,
    leaves: usize,
    failures: usize,
}

impl<P> TreeOrchestrator<P>
where
    P: StatisticsProvider + 'static,
{
    pub fn new(provider: P, cache: PlyCache, options: CrawlOptions) -> Self {
        let fetcher = LineFetcher::new(
            provider,
            SignificanceFilter::new(options.significance_threshold),
            options.task_timeout,
        );

        Self {
            fetcher: Arc::new(fetcher),
            cache,
            options,
        }
    }

    pub async fn build_tree(&self) -> Result<OpeningTree> {
        let max_ply = self.options.max_ply();
        let starting_run_time = Instant::now();
        let mut tree = OpeningTree::new();

        info!(
            "Building opening tree to ply {} with {} workers",
            max_ply, self.options.workers
        );

        for ply in 0..=max_ply {
            info!("Going over ply: {}", ply);

            let snapshot = match self.cache.load(ply)? {
                Some(snapshot) => {
                    info!("Using cached ply {} with {} lines", ply, snapshot.len());
                    snapshot
                }
                None => {
                    let frontier = build_frontier(ply, tree.last());

                    if frontier.is_empty() {
                        info!("Frontier for ply {} is empty", ply);
                        break;
                    }

                    let ply_start = Instant::now();
                    let num_lines = frontier.len();
                    let resolved = self.resolve(ply, frontier).await?;

                    info!(
                        "Ply {}: Lines: {}, Kept: {}, Leaves: {}, Dropped: {}, Continuations: {}, Elapsed: {:.1}s",
                        ply,
                        num_lines,
                        resolved.snapshot.len(),
                        resolved.leaves,
                        resolved.failures,
                        resolved.snapshot.num_continuations(),
                        ply_start.elapsed().as_secs_f32()
                    );

                    if ply == 0 && resolved.snapshot.is_empty() {
                        info!("No continuation from the starting position");
                        break;
                    }

                    self.cache.store(ply, &resolved.snapshot)?;
                    resolved.snapshot
                }
            };

            let exhausted = snapshot.num_continuations() == 0;
            tree.push(snapshot);

            if exhausted {
                info!("No continuation left after ply {}", ply);
                break;
            }
        }

        info!(
            "Opening tree built. Depth: {}, Elapsed: {:.2}m",
            tree.depth(),
            starting_run_time.elapsed().as_secs_f32() / 60.0
        );

        Ok(tree)
    }

    async fn resolve(&self, ply: usize, frontier: Vec<MoveSequence>) -> Result<Resolved> {
        let pool = Arc::new(Semaphore::new(self.options.workers.max(1)));
        let mut tasks = JoinSet::new();

        for sequence in frontier {
            let fetcher = self.fetcher.clone();
            let pool = pool.clone();

            tasks.spawn(async move {
                let _permit = pool.acquire_owned().await;
                let result = fetcher.fetch(&sequence, ply).await;
                (sequence, result)
            });
        }

        let join_all = async {
            let mut resolved = Resolved {
                snapshot: PlySnapshot::new(),
                leaves: 0,
                failures: 0,
            };

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((sequence, Ok(Some(line)))) => resolved.snapshot.insert(sequence, line),
                    Ok((sequence, Ok(None))) => {
                        debug!("Leaf: {}", sequence);
                        resolved.leaves += 1;
                    }
                    Ok((_, Err(err))) if ply == 0 => {
                        return Err(anyhow::Error::from(err).context("Failed to fetch the root"));
                    }
                    Ok((_, Err(err))) => {
                        warn!("Dropping line. {}", err);
                        resolved.failures += 1;
                    }
                    Err(err) if ply == 0 => {
                        return Err(anyhow::Error::from(err).context("Failed to fetch the root"));
                    }
                    Err(err) => {
                        error!("Fetch task failed. {}", err);
                        resolved.failures += 1;
                    }
                }
            }

            Ok(resolved)
        };

        tokio::time::timeout(self.options.depth_timeout, join_all)
            .await
            .map_err(|_| {
                anyhow!(
                    "Ply {} did not complete within {:?}",
                    ply,
                    self.options.depth_timeout
                )
            })?
    }
}

/// Lines to query at `ply`: the root at ply 0, otherwise every line of the previous ply
/// extended by each of its kept continuations.
pub fn build_frontier(ply: usize, previous: Option<&PlySnapshot>) -> Vec<MoveSequence> {
    match (ply, previous) {
        (0, _) => vec![MoveSequence::root()],
        (_, Some(previous)) => previous.extended_lines().collect(),
        (_, None) => vec![],
    }
}
