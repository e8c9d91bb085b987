use log::debug;
use std::time::Duration;

use super::{
    normalize, CoordinateTranslator, FetchError, LineResult, MoveSequence, SignificanceFilter,
    StatisticsProvider,
};

/// Resolves one line: a single provider query, significance filtering, normalization and
/// coordinate translation. Holds no mutable state so fetches can run concurrently.
pub struct LineFetcher<P> {
    provider: P,
    filter: SignificanceFilter,
    translator: CoordinateTranslator,
    query_timeout: Duration,
}

impl<P: StatisticsProvider> LineFetcher<P> {
    pub fn new(provider: P, filter: SignificanceFilter, query_timeout: Duration) -> Self {
        Self {
            provider,
            filter,
            translator: CoordinateTranslator::new(),
            query_timeout,
        }
    }

    /// `Ok(None)` means the provider had nothing significant for the line, a leaf.
    pub async fn fetch(
        &self,
        sequence: &MoveSequence,
        ply: usize,
    ) -> Result<Option<LineResult>, FetchError> {
        let query = self.provider.query(&sequence.key(), ply);

        let candidates = match tokio::time::timeout(self.query_timeout, query).await {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(err)) => {
                return Err(FetchError::ProviderUnavailable {
                    line: sequence.clone(),
                    reason: format!("{:#}", err),
                })
            }
            Err(_) => {
                return Err(FetchError::ProviderUnavailable {
                    line: sequence.clone(),
                    reason: format!("no answer within {:?}", self.query_timeout),
                })
            }
        };

        let kept = self.filter.filter(&candidates, ply);

        let moves = match normalize(kept) {
            Some(moves) => moves,
            None => {
                debug!("No significant continuation for {}", sequence);
                return Ok(None);
            }
        };

        let notations: Vec<&str> = moves.iter().map(|m| m.notation.as_str()).collect();
        let (path, coords) = self.translator.translate(sequence, &notations)?;

        Ok(Some(LineResult::new(path, moves, coords)))
    }
}
