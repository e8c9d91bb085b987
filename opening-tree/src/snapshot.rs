use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{BoardCoordinate, MoveSequence, WeightedMove};

/// The continuations kept for one line. `sans`, `coords` and `probas` are parallel and
/// ordered by descending play count; `probas` sums to 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    #[serde(rename = "last coord")]
    pub path: Vec<BoardCoordinate>,
    pub sans: Vec<String>,
    pub coords: Vec<BoardCoordinate>,
    pub probas: Vec<f64>,
}

impl LineResult {
    pub fn new(
        path: Vec<BoardCoordinate>,
        moves: Vec<WeightedMove>,
        coords: Vec<BoardCoordinate>,
    ) -> Self {
        let (sans, probas): (Vec<String>, Vec<f64>) = moves
            .into_iter()
            .map(|m| (m.notation, m.probability))
            .unzip();

        Self {
            path,
            sans,
            coords,
            probas,
        }
    }

    pub fn continuations(&self) -> impl Iterator<Item = (&str, &BoardCoordinate, f64)> {
        self.sans
            .iter()
            .zip(self.coords.iter())
            .zip(self.probas.iter())
            .map(|((san, coord), proba)| (san.as_str(), coord, *proba))
    }

    pub fn len(&self) -> usize {
        self.sans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sans.is_empty()
    }
}

/// Every line reached at one depth, keyed by its move sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlySnapshot {
    lines: BTreeMap<MoveSequence, LineResult>,
}

impl PlySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sequence: MoveSequence, line: LineResult) {
        self.lines.insert(sequence, line);
    }

    pub fn get(&self, sequence: &MoveSequence) -> Option<&LineResult> {
        self.lines.get(sequence)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MoveSequence, &LineResult)> {
        self.lines.iter()
    }

    /// Every line extended by each of its kept continuations.
    pub fn extended_lines(&self) -> impl Iterator<Item = MoveSequence> + '_ {
        self.lines
            .iter()
            .flat_map(|(sequence, line)| line.sans.iter().map(|san| sequence.extended(san)))
    }

    pub fn num_continuations(&self) -> usize {
        self.lines.values().map(LineResult::len).sum()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Snapshots indexed by depth, starting at the root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpeningTree {
    plies: Vec<PlySnapshot>,
}

impl OpeningTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: PlySnapshot) {
        self.plies.push(snapshot);
    }

    pub fn get(&self, ply: usize) -> Option<&PlySnapshot> {
        self.plies.get(ply)
    }

    pub fn last(&self) -> Option<&PlySnapshot> {
        self.plies.last()
    }

    /// Number of depths resolved, the root included.
    pub fn depth(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.iter().all(PlySnapshot::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlySnapshot> {
        self.plies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(sans: &[&str], probas: &[f64]) -> LineResult {
        LineResult {
            path: vec![],
            sans: sans.iter().map(|s| s.to_string()).collect(),
            coords: sans.iter().map(|_| BoardCoordinate::new(0, 0, 0, 0)).collect(),
            probas: probas.to_vec(),
        }
    }

    #[test]
    fn test_line_result_field_names() {
        let line = LineResult {
            path: vec![BoardCoordinate::new(4, 1, 4, 3)],
            sans: vec!["c5".to_string()],
            coords: vec![BoardCoordinate::new(2, 6, 2, 4)],
            probas: vec![1.0],
        };

        let json = serde_json::to_string(&line).unwrap();

        assert_eq!(
            json,
            r#"{"last coord":[[4,1,4,3]],"sans":["c5"],"coords":[[2,6,2,4]],"probas":[1.0]}"#
        );
    }

    #[test]
    fn test_snapshot_is_a_map_keyed_by_line() {
        let mut snapshot = PlySnapshot::new();
        snapshot.insert(MoveSequence::from_key("e4"), line(&["c5"], &[1.0]));

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: PlySnapshot = serde_json::from_str(&json).unwrap();

        assert!(json.starts_with(r#"{"e4":{"#));
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_extended_lines() {
        let mut snapshot = PlySnapshot::new();
        snapshot.insert(MoveSequence::from_key("e4"), line(&["c5", "e5"], &[0.6, 0.4]));
        snapshot.insert(MoveSequence::from_key("d4"), line(&["Nf6"], &[1.0]));

        let lines: Vec<String> = snapshot.extended_lines().map(|s| s.key()).collect();

        assert_eq!(lines, vec!["d4+Nf6", "e4+c5", "e4+e5"]);
        assert_eq!(snapshot.num_continuations(), 3);
    }

    #[test]
    fn test_root_snapshot_extends_to_single_moves() {
        let mut snapshot = PlySnapshot::new();
        snapshot.insert(MoveSequence::root(), line(&["e4", "d4"], &[0.6, 0.4]));

        let lines: Vec<MoveSequence> = snapshot.extended_lines().collect();

        assert_eq!(
            lines,
            vec![MoveSequence::from_key("e4"), MoveSequence::from_key("d4")]
        );
    }

    #[test]
    fn test_opening_tree_depth() {
        let mut tree = OpeningTree::new();
        assert!(tree.is_empty());

        tree.push(PlySnapshot::new());
        tree.push(PlySnapshot::new());

        assert_eq!(tree.depth(), 2);
        assert!(tree.is_empty());
        assert!(tree.get(2).is_none());
    }
}
