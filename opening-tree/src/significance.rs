use log::debug;

use super::Candidate;

pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 0.01;

#[derive(Clone, Debug, PartialEq)]
pub struct WeightedMove {
    pub notation: String,
    pub played: u64,
    /// `played * percentage` for the side selected by the ply parity.
    pub weight: f64,
    /// `weight` over the sum of kept weights. Zero until normalized.
    pub probability: f64,
}

/// Keeps the leading candidates that each hold at least `threshold` of the games seen so far.
#[derive(Clone, Copy, Debug)]
pub struct SignificanceFilter {
    threshold: f64,
}

impl Default for SignificanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNIFICANCE_THRESHOLD)
    }
}

impl SignificanceFilter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Scans `candidates` in order and stops at the first one without a play count or below
    /// the threshold of the running total (itself included). The kept set is always a prefix.
    pub fn filter(&self, candidates: &[Candidate], ply: usize) -> Vec<WeightedMove> {
        let mut total_played: u64 = 0;
        let mut kept = Vec::new();

        for candidate in candidates {
            let played = match candidate.played {
                Some(played) if played > 0 => played,
                _ => break,
            };

            total_played = total_played.saturating_add(played);

            if (played as f64) < self.threshold * total_played as f64 {
                debug!(
                    "Stopping at {} ({} of {} games)",
                    candidate.notation, played, total_played
                );
                break;
            }

            let percentage = side_percentage(&candidate.percentages, ply).unwrap_or(0);

            kept.push(WeightedMove {
                notation: candidate.notation.clone(),
                played,
                weight: played as f64 * percentage as f64,
                probability: 0.0,
            });
        }

        kept
    }
}

/// Divides each weight by the sum of weights. Returns `None` when there is nothing to
/// distribute, either no moves or only zero weights.
pub fn normalize(mut moves: Vec<WeightedMove>) -> Option<Vec<WeightedMove>> {
    let total_weight: f64 = moves.iter().map(|m| m.weight).sum();

    if moves.is_empty() || total_weight <= 0.0 {
        return None;
    }

    for m in moves.iter_mut() {
        m.probability = m.weight / total_weight;
    }

    Some(moves)
}

// Odd plies read the last percentage, even plies the first.
fn side_percentage(percentages: &[u32], ply: usize) -> Option<u32> {
    if ply % 2 == 1 {
        percentages.last().copied()
    } else {
        percentages.first().copied()
    }
}
