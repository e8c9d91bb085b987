use anyhow::Result;
use common::Config;
use std::time::Duration;

use super::DEFAULT_SIGNIFICANCE_THRESHOLD;

pub const DEFAULT_MAX_PLY: usize = 6;
pub const DEFAULT_AUTHENTICATED_MAX_PLY: usize = 15;

#[derive(Clone, Debug)]
pub struct CrawlOptions {
    /// Explicit depth limit. When unset the limit follows from whether a session is present.
    pub max_ply: Option<usize>,
    pub session_id: Option<String>,
    pub workers: usize,
    pub task_timeout: Duration,
    pub depth_timeout: Duration,
    pub significance_threshold: f64,
}

impl CrawlOptions {
    pub fn max_ply(&self) -> usize {
        self.max_ply.unwrap_or(if self.session_id.is_some() {
            DEFAULT_AUTHENTICATED_MAX_PLY
        } else {
            DEFAULT_MAX_PLY
        })
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_ply: None,
            session_id: None,
            workers: default_workers(),
            task_timeout: Duration::from_secs(10),
            depth_timeout: Duration::from_secs(3600),
            significance_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
        }
    }
}

impl Config for CrawlOptions {
    fn load(config: &common::ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            max_ply: config.get("max_ply").and_then(|v| v.as_usize()),
            session_id: config
                .get("session_id")
                .and_then(|v| v.as_string())
                .filter(|s| !s.is_empty()),
            workers: config
                .get("workers")
                .and_then(|v| v.as_usize())
                .filter(|&w| w > 0)
                .unwrap_or(defaults.workers),
            task_timeout: config
                .get("task_timeout_secs")
                .and_then(|v| v.as_u64())
                .map(Duration::from_secs)
                .unwrap_or(defaults.task_timeout),
            depth_timeout: config
                .get("depth_timeout_secs")
                .and_then(|v| v.as_u64())
                .map(Duration::from_secs)
                .unwrap_or(defaults.depth_timeout),
            significance_threshold: config
                .get("significance_threshold")
                .and_then(|v| v.as_f64())
                .unwrap_or(defaults.significance_threshold),
        })
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
