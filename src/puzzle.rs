//! One round of the duel: constraint letters, a solution, and a response.

use crate::contestant::ContestantId;
use crate::letters::Letters;
use crate::outcome::Outcome;
use crate::rules::{self, Ranking};
use crate::words::WordList;
use std::sync::Arc;
use tracing::debug;

/// Result of mutating a puzzle, returned in place of listener callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleEvent {
    /// The outcome after the mutation.
    pub outcome: Outcome,
    /// Whether the puzzle reached a terminal state.
    pub completed: bool,
}

/// A single puzzle round.
///
/// The letters, owner, and word list are fixed at construction; the solution
/// and response are the only mutable answers. For both, `None` means nothing
/// has been entered yet while `Some("")` is an explicit skip or decline.
/// The [`Outcome`] is derived on demand from the current fields, never
/// stored.
#[derive(Debug, Clone)]
pub struct Puzzle {
    letters: Letters,
    owner: ContestantId,
    words: Arc<WordList>,
    solution: Option<String>,
    response: Option<String>,
    hint: Option<String>,
    previous_word: Option<String>,
    minimum_word_length: usize,
    elapsed_seconds: f32,
}

impl Puzzle {
    /// Default lower bound on solution length.
    pub const DEFAULT_MINIMUM_WORD_LENGTH: usize = 4;

    /// Creates a fresh puzzle owned by the given contestant.
    pub fn new(letters: Letters, owner: ContestantId, words: Arc<WordList>) -> Self {
        Self {
            letters,
            owner,
            words,
            solution: None,
            response: None,
            hint: None,
            previous_word: None,
            minimum_word_length: Self::DEFAULT_MINIMUM_WORD_LENGTH,
            elapsed_seconds: 0.0,
        }
    }

    /// The constraint letters.
    pub fn letters(&self) -> Letters {
        self.letters
    }

    /// The contestant this puzzle was dealt to; any score goes to them.
    pub fn owner(&self) -> ContestantId {
        self.owner
    }

    /// The word list this round draws from.
    pub fn words(&self) -> &Arc<WordList> {
        &self.words
    }

    /// The owner's answer, if entered.
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    /// The challenger's counter-offer, if entered.
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// A better word the players missed, set after resolution.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// The word carried over from the previous round under hyperghost rules.
    pub fn previous_word(&self) -> Option<&str> {
        self.previous_word.as_deref()
    }

    /// Minimum acceptable solution length.
    pub fn minimum_word_length(&self) -> usize {
        self.minimum_word_length
    }

    /// Seconds this puzzle has been open, accrued by the score tick.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed_seconds
    }

    /// Overrides the minimum acceptable solution length.
    pub fn set_minimum_word_length(&mut self, length: usize) {
        self.minimum_word_length = length;
    }

    /// Seeds the continuation hint carried over from the previous round.
    pub fn set_previous_word(&mut self, word: Option<String>) {
        self.previous_word = word.map(|w| w.to_uppercase());
    }

    /// Records the post-resolution hint for display.
    pub fn set_hint(&mut self, hint: impl Into<String>) {
        self.hint = Some(hint.into());
    }

    /// Enters the owner's solution. An empty string is an explicit skip.
    pub fn set_solution(&mut self, solution: &str) -> PuzzleEvent {
        self.solution = Some(solution.to_uppercase());
        debug!(solution = %solution, "solution entered");
        self.event()
    }

    /// Enters the challenger's response. An empty string declines to
    /// challenge.
    pub fn set_response(&mut self, response: &str) -> PuzzleEvent {
        self.response = Some(response.to_uppercase());
        debug!(response = %response, "response entered");
        self.event()
    }

    fn event(&self) -> PuzzleEvent {
        PuzzleEvent {
            outcome: self.result(),
            completed: self.is_completed(),
        }
    }

    /// Whether this round has reached a terminal outcome. Every response,
    /// including an empty decline, resolves the puzzle.
    pub fn is_completed(&self) -> bool {
        self.response.is_some()
    }

    /// Whether the standing response actually beat the solution.
    pub fn is_improved(&self) -> bool {
        self.result().is_improvement()
    }

    /// The score delta this round currently carries.
    pub fn score(&self) -> i32 {
        self.result().score()
    }

    /// Accrues open time. The interval is supplied by the score tick; the
    /// accrual is additive, so tick rate only affects granularity.
    pub fn adjust_score(&mut self, seconds: f32) {
        if !self.is_completed() {
            self.elapsed_seconds += seconds;
        }
    }

    /// Derives the outcome of this round from its current fields.
    pub fn result(&self) -> Outcome {
        let Some(solution) = self.solution.as_deref() else {
            return Outcome::Unknown;
        };
        match self.response.as_deref() {
            None => self.check_solution(solution),
            Some(response) => self.check_response(response),
        }
    }

    fn check_solution(&self, solution: &str) -> Outcome {
        if solution.is_empty() {
            return Outcome::Skipped;
        }
        if !self.words.contains(solution) {
            return Outcome::NotAWord;
        }
        if !rules::is_match(solution, self.letters) {
            return Outcome::NotAMatch;
        }
        if solution.len() < self.minimum_word_length {
            return Outcome::TooShort;
        }
        Outcome::Valid
    }

    fn check_response(&self, response: &str) -> Outcome {
        let skipped = self.solution.as_deref().is_none_or(str::is_empty);
        if response.is_empty() {
            return if skipped {
                Outcome::Skipped
            } else {
                Outcome::NotImproved
            };
        }
        if !rules::is_match(response, self.letters) {
            return if skipped {
                Outcome::ImprovedSkipNotAMatch
            } else {
                Outcome::ImprovementNotAMatch
            };
        }
        if !self.words.contains(response) {
            return if skipped {
                Outcome::ImprovedSkipNotAWord
            } else {
                Outcome::ImprovementNotAWord
            };
        }
        if response.len() < self.minimum_word_length {
            return if skipped {
                Outcome::ImprovedSkipTooShort
            } else {
                Outcome::ImprovementTooShort
            };
        }
        if skipped {
            return Outcome::WordFound;
        }
        // Both words stand; the ranking rule settles it.
        let solution = self.solution.as_deref().unwrap_or_default();
        match rules::rank(response, solution) {
            Ranking::Shorter => Outcome::Shorter,
            Ranking::Earlier => Outcome::Earlier,
            Ranking::Longer => Outcome::Longer,
            Ranking::Later => Outcome::Later,
            Ranking::Equal => Outcome::NotImproved,
        }
    }

    /// Scans the full word list for the first word that would outrank
    /// whichever of solution or response currently stands.
    ///
    /// Returns `None` when nothing in the list improves on it, the
    /// "Perfect!" case. Used for the end-of-round hint, never for scoring.
    pub fn find_next_better(&self) -> Option<String> {
        let incumbent = if self.is_improved() {
            self.response.as_deref().unwrap_or_default()
        } else {
            self.solution.as_deref().unwrap_or_default()
        };
        for word in self.words.iter() {
            if word.len() < self.minimum_word_length {
                continue;
            }
            if !rules::is_match(word, self.letters) {
                continue;
            }
            if incumbent.is_empty() || rules::rank(word, incumbent).is_improvement() {
                return Some(word.to_string());
            }
        }
        None
    }
}
