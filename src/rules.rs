//! Pure matching and ranking rules.
//!
//! These are the only places where "does this word satisfy the puzzle" and
//! "is this word better than that one" are decided; everything else defers
//! here. Both functions assume their inputs are uppercase-normalized.

use crate::letters::Letters;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How a candidate word compares against an incumbent.
///
/// Shorter length always wins; among equal lengths the lexicographically
/// earlier word wins. `rank(x, x)` is [`Ranking::Equal`] for every `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ranking {
    /// Candidate is shorter than the incumbent.
    Shorter,
    /// Same length, candidate sorts earlier.
    Earlier,
    /// Identical words.
    Equal,
    /// Candidate is longer than the incumbent.
    Longer,
    /// Same length, candidate sorts later.
    Later,
}

impl Ranking {
    /// Whether the candidate beats the incumbent.
    pub fn is_improvement(self) -> bool {
        matches!(self, Ranking::Shorter | Ranking::Earlier)
    }
}

/// Checks whether a word satisfies the constraint letters.
///
/// The word must start with the first letter, end with the last letter, and
/// contain the middle letter at an index strictly between the first and last
/// characters. Words of length two or less can never satisfy the interior
/// requirement and return false.
pub fn is_match(word: &str, letters: Letters) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 3 {
        return false;
    }
    if chars[0] != letters.first() {
        return false;
    }
    if chars[chars.len() - 1] != letters.last() {
        return false;
    }
    chars[1..chars.len() - 1].contains(&letters.middle())
}

/// Ranks a candidate word against an incumbent.
///
/// Both words are assumed to already be valid matches. This is the sole
/// tie-break rule used anywhere "better" is decided.
pub fn rank(candidate: &str, incumbent: &str) -> Ranking {
    match candidate.len().cmp(&incumbent.len()) {
        Ordering::Greater => Ranking::Longer,
        Ordering::Less => Ranking::Shorter,
        Ordering::Equal => match candidate.cmp(incumbent) {
            Ordering::Greater => Ranking::Later,
            Ordering::Less => Ranking::Earlier,
            Ordering::Equal => Ranking::Equal,
        },
    }
}
