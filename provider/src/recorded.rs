use anyhow::{Context, Result};
use futures::future::{self, Ready};
use opening_tree::{Candidate, StatisticsProvider};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::SuggestedMove;

/// Replays suggested moves captured earlier, keyed by ply and then by line path.
///
/// ```json
/// { "0": { "": [{ "san": "e4", "total_games": "1000", "percents": ["46%", "54%"] }] } }
/// ```
///
/// A line missing from the recording has no data.
pub struct RecordedProvider {
    recording: HashMap<usize, HashMap<String, Vec<Candidate>>>,
}

impl RecordedProvider {
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open recording {:?}", path))?;

        let recording: HashMap<usize, HashMap<String, Vec<SuggestedMove>>> =
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse recording {:?}", path))?;

        Ok(Self::new(recording))
    }

    pub fn new(recording: HashMap<usize, HashMap<String, Vec<SuggestedMove>>>) -> Self {
        let recording = recording
            .into_iter()
            .map(|(ply, lines)| {
                let lines = lines
                    .into_iter()
                    .map(|(path, moves)| {
                        (path, moves.iter().map(SuggestedMove::to_candidate).collect())
                    })
                    .collect();
                (ply, lines)
            })
            .collect();

        Self { recording }
    }
}

impl StatisticsProvider for RecordedProvider {
    type Future = Ready<Result<Vec<Candidate>>>;

    fn query(&self, path: &str, ply: usize) -> Self::Future {
        let candidates = self
            .recording
            .get(&ply)
            .and_then(|lines| lines.get(path))
            .cloned()
            .unwrap_or_default();

        future::ready(Ok(candidates))
    }
}
