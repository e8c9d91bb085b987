use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

const MOVE_SEPARATOR: char = '+';

/// An ordered list of algebraic moves played from the starting position.
///
/// The key form joins the moves with `+`, which is also the path format the
/// statistics provider expects. A move carrying a check marker (`Bb5+`) leaves an
/// empty segment behind when the key is split, so `from_key` re-attaches it to the
/// preceding move and `from_key(&s.key()) == s` holds for every sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MoveSequence {
    moves: Vec<String>,
}

impl MoveSequence {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(moves: Vec<String>) -> Self {
        Self { moves }
    }

    pub fn from_key(key: &str) -> Self {
        let mut moves: Vec<String> = Vec::new();

        for segment in key.split(MOVE_SEPARATOR) {
            if !segment.is_empty() {
                moves.push(segment.to_string());
            } else if let Some(last) = moves.last_mut() {
                last.push(MOVE_SEPARATOR);
            }
        }

        Self { moves }
    }

    pub fn key(&self) -> String {
        self.moves.join(&MOVE_SEPARATOR.to_string())
    }

    /// Returns a new sequence with `notation` appended. `self` is left untouched.
    pub fn extended(&self, notation: &str) -> Self {
        let mut moves = self.moves.clone();
        moves.push(notation.to_string());
        Self { moves }
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl From<String> for MoveSequence {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<MoveSequence> for String {
    fn from(sequence: MoveSequence) -> Self {
        sequence.key()
    }
}

impl Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.key())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(moves: &[&str]) -> MoveSequence {
        MoveSequence::new(moves.iter().map(|m| m.to_string()).collect())
    }

    #[test]
    fn test_root_key_is_empty() {
        assert_eq!(MoveSequence::root().key(), "");
        assert_eq!(MoveSequence::from_key(""), MoveSequence::root());
    }

    #[test]
    fn test_key_joins_moves() {
        assert_eq!(seq(&["e4", "e5", "Nf3"]).key(), "e4+e5+Nf3");
    }

    #[test]
    fn test_single_move_key() {
        assert_eq!(MoveSequence::from_key("e4"), seq(&["e4"]));
    }

    #[test]
    fn test_check_marker_survives_round_trip() {
        let with_check = seq(&["e4", "e5", "Bc4", "Nc6", "Bxf7+", "Kxf7"]);

        assert_eq!(with_check.key(), "e4+e5+Bc4+Nc6+Bxf7++Kxf7");
        assert_eq!(MoveSequence::from_key(&with_check.key()), with_check);
    }

    #[test]
    fn test_trailing_check_marker_survives_round_trip() {
        let with_check = seq(&["e4", "f5", "Qh5+"]);

        assert_eq!(MoveSequence::from_key(&with_check.key()), with_check);
    }

    #[test]
    fn test_extended_does_not_mutate() {
        let base = seq(&["d4"]);
        let extended = base.extended("Nf6");

        assert_eq!(base, seq(&["d4"]));
        assert_eq!(extended, seq(&["d4", "Nf6"]));
    }

    #[test]
    fn test_equality_is_element_wise() {
        assert_ne!(seq(&["e4", "e5"]), seq(&["e5", "e4"]));
        assert_eq!(seq(&["e4", "e5"]), MoveSequence::from_key("e4+e5"));
    }

    #[test]
    fn test_serializes_as_key_string() {
        let json = serde_json::to_string(&seq(&["e4", "c5"])).unwrap();

        assert_eq!(json, "\"e4+c5\"");
        assert_eq!(
            serde_json::from_str::<MoveSequence>(&json).unwrap(),
            seq(&["e4", "c5"])
        );
    }
}
