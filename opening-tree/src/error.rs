use thiserror::Error;

use super::MoveSequence;

/// Failure of a single line. The orchestrator drops the line and carries on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("provider unavailable for line '{line}': {reason}")]
    ProviderUnavailable { line: MoveSequence, reason: String },

    #[error("illegal move '{notation}' in line '{line}'")]
    IllegalMove { line: MoveSequence, notation: String },
}
