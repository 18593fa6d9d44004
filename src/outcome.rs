//! The closed taxonomy of puzzle outcomes.
//!
//! Every combination of unset/empty/invalid solution and response maps to a
//! member of this enum; outcome evaluation never fails. Score deltas are
//! fixed constants independent of the words involved.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// The named, score-bearing result of comparing a solution and a response.
///
/// Displays as the lowercase label, with the signed score appended when it
/// is nonzero, e.g. `"shorter (+1)"` or `"word found (-1)"`. The
/// `Improvement*` and `ImprovedSkip*` pairs render as the bare failure
/// reason; they differ only in who is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Outcome {
    /// No solution entered yet.
    Unknown,
    /// Solution is not in the word list.
    NotAWord,
    /// Solution is below the minimum word length.
    TooShort,
    /// Solution stands; scoring waits for the response phase.
    Valid,
    /// Solution does not satisfy the constraint letters.
    NotAMatch,
    /// Response beat the solution by being shorter.
    Shorter,
    /// Response beat the solution alphabetically at equal length.
    Earlier,
    /// Response was longer than the solution.
    Longer,
    /// Response sorted later than the solution at equal length.
    Later,
    /// Response failed to improve on the solution.
    NotImproved,
    /// Both sides passed on the puzzle.
    Skipped,
    /// The owner skipped, but the challenger found a word.
    WordFound,
    /// Challenge to a valid solution was not in the word list.
    ImprovementNotAWord,
    /// Challenge to a valid solution did not match the letters.
    ImprovementNotAMatch,
    /// Challenge to a valid solution was below the minimum length.
    ImprovementTooShort,
    /// Challenge to a skipped puzzle was not in the word list.
    ImprovedSkipNotAWord,
    /// Challenge to a skipped puzzle did not match the letters.
    ImprovedSkipNotAMatch,
    /// Challenge to a skipped puzzle was below the minimum length.
    ImprovedSkipTooShort,
}

impl Outcome {
    /// The fixed score delta credited to the puzzle owner.
    pub const fn score(self) -> i32 {
        match self {
            Outcome::Unknown
            | Outcome::NotAWord
            | Outcome::TooShort
            | Outcome::Valid
            | Outcome::NotAMatch => 0,
            Outcome::Shorter => 1,
            Outcome::Earlier => 2,
            Outcome::Longer | Outcome::Later | Outcome::NotImproved => 3,
            Outcome::Skipped => 1,
            Outcome::WordFound => -1,
            Outcome::ImprovementNotAWord
            | Outcome::ImprovementNotAMatch
            | Outcome::ImprovementTooShort => 3,
            Outcome::ImprovedSkipNotAWord
            | Outcome::ImprovedSkipNotAMatch
            | Outcome::ImprovedSkipTooShort => 1,
        }
    }

    /// Whether the response actually beat the solution.
    pub const fn is_improvement(self) -> bool {
        matches!(
            self,
            Outcome::Shorter | Outcome::Earlier | Outcome::WordFound
        )
    }

    /// Whether a solution with this outcome may proceed to the response
    /// phase. Only a constraint failure sends the owner back to the solution
    /// prompt; a dictionary miss or a short word stands and gets scored.
    pub const fn is_valid_solution(self) -> bool {
        !matches!(self, Outcome::Unknown | Outcome::NotAMatch)
    }

    fn label(self) -> &'static str {
        match self {
            Outcome::Unknown => "unknown",
            Outcome::NotAWord => "not a word",
            Outcome::TooShort => "too short",
            Outcome::Valid => "valid",
            Outcome::NotAMatch => "not a match",
            Outcome::Shorter => "shorter",
            Outcome::Earlier => "earlier",
            Outcome::Longer => "longer",
            Outcome::Later => "later",
            Outcome::NotImproved => "not improved",
            Outcome::Skipped => "skipped",
            Outcome::WordFound => "word found",
            Outcome::ImprovementNotAWord | Outcome::ImprovedSkipNotAWord => "not a word",
            Outcome::ImprovementNotAMatch | Outcome::ImprovedSkipNotAMatch => "not a match",
            Outcome::ImprovementTooShort | Outcome::ImprovedSkipTooShort => "too short",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let score = self.score();
        if score == 0 {
            write!(f, "{}", self.label())
        } else if score > 0 {
            write!(f, "{} (+{})", self.label(), score)
        } else {
            write!(f, "{} ({})", self.label(), score)
        }
    }
}
