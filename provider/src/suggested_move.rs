use once_cell::sync::Lazy;
use opening_tree::Candidate;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").unwrap());

/// The fields of one suggested move as the explorer displays them.
///
/// The move text is empty when the explorer renders the piece as an icon, in which case the
/// piece comes from the icon class and the rest of the move from `after_figurine`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedMove {
    #[serde(default)]
    pub san: String,
    #[serde(default)]
    pub figurine: Option<String>,
    #[serde(default)]
    pub after_figurine: String,
    #[serde(default)]
    pub total_games: String,
    #[serde(default)]
    pub percents: Vec<String>,
}

impl SuggestedMove {
    pub fn notation(&self) -> String {
        if !self.san.is_empty() {
            return self.san.clone();
        }

        let piece = self
            .figurine
            .as_deref()
            .and_then(figurine_piece)
            .map(String::from)
            .unwrap_or_default();

        piece + &self.after_figurine
    }

    pub fn to_candidate(&self) -> Candidate {
        Candidate::new(
            self.notation(),
            digits(&self.total_games),
            self.percents.iter().filter_map(|p| digits(p)).collect(),
        )
    }
}

/// Piece letter for an icon class such as `knight-white`.
pub fn figurine_piece(class: &str) -> Option<char> {
    let class = class.trim();

    [
        ("knight", 'N'),
        ("bishop", 'B'),
        ("rook", 'R'),
        ("queen", 'Q'),
        ("king", 'K'),
    ]
    .iter()
    .find(|(prefix, _)| class.starts_with(prefix))
    .map(|(_, piece)| *piece)
}

/// Parses the number left after dropping every non-digit. `None` when nothing is left.
pub fn digits<T: std::str::FromStr>(text: &str) -> Option<T> {
    let digits = NON_DIGIT.replace_all(text, "");

    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
