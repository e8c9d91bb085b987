use serde::{Deserialize, Serialize};
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Position, Square};
use std::fmt::{self, Display};

use super::{FetchError, MoveSequence};

/// Zero indexed (from-file, from-rank, to-file, to-rank) of a fully resolved move.
///
/// Castling is expressed as the king's two square move, so `O-O` for white is `[4, 0, 6, 0]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct BoardCoordinate {
    pub from_file: u8,
    pub from_rank: u8,
    pub to_file: u8,
    pub to_rank: u8,
}

impl BoardCoordinate {
    pub fn new(from_file: u8, from_rank: u8, to_file: u8, to_rank: u8) -> Self {
        Self {
            from_file,
            from_rank,
            to_file,
            to_rank,
        }
    }

    fn from_squares(from: Square, to: Square) -> Self {
        Self::new(
            from.file() as u8,
            from.rank() as u8,
            to.file() as u8,
            to.rank() as u8,
        )
    }
}

impl From<[u8; 4]> for BoardCoordinate {
    fn from([from_file, from_rank, to_file, to_rank]: [u8; 4]) -> Self {
        Self::new(from_file, from_rank, to_file, to_rank)
    }
}

impl From<BoardCoordinate> for [u8; 4] {
    fn from(coord: BoardCoordinate) -> Self {
        [coord.from_file, coord.from_rank, coord.to_file, coord.to_rank]
    }
}

impl Display for BoardCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            (b'a' + self.from_file) as char,
            self.from_rank + 1,
            (b'a' + self.to_file) as char,
            self.to_rank + 1
        )
    }
}

/// Resolves algebraic notation against a legal move generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoordinateTranslator;

impl CoordinateTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Replays `sequence` from the starting position, then resolves each continuation
    /// against the reached position. Continuations are not played, so each one is
    /// evaluated from the same base position.
    pub fn translate<S: AsRef<str>>(
        &self,
        sequence: &MoveSequence,
        continuations: &[S],
    ) -> Result<(Vec<BoardCoordinate>, Vec<BoardCoordinate>), FetchError> {
        let mut pos = Chess::default();
        let mut path = Vec::with_capacity(sequence.len());

        for notation in sequence.moves() {
            let (m, coord) = resolve(&pos, notation).ok_or_else(|| illegal(sequence, notation))?;
            pos.play_unchecked(&m);
            path.push(coord);
        }

        let continuation_coords = continuations
            .iter()
            .map(|notation| {
                let notation = notation.as_ref();
                resolve(&pos, notation)
                    .map(|(_, coord)| coord)
                    .ok_or_else(|| illegal(sequence, notation))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((path, continuation_coords))
    }
}

fn resolve(pos: &Chess, notation: &str) -> Option<(shakmaty::Move, BoardCoordinate)> {
    let san: SanPlus = notation.trim().parse().ok()?;
    let m = san.san.to_move(pos).ok()?;

    match m.to_uci(CastlingMode::Standard) {
        UciMove::Normal { from, to, .. } => Some((m, BoardCoordinate::from_squares(from, to))),
        _ => None,
    }
}

fn illegal(sequence: &MoveSequence, notation: &str) -> FetchError {
    FetchError::IllegalMove {
        line: sequence.clone(),
        notation: notation.to_string(),
    }
}
