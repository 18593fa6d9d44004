//! The match: contestants, turn rotation, puzzles, and win detection.

use crate::contestant::{Contestant, ContestantId};
use crate::letters::Letters;
use crate::outcome::Outcome;
use crate::puzzle::Puzzle;
use crate::random::Randomizer;
use crate::words::WordList;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Per-contestant summary of where a match stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Contestant name.
    pub name: String,
    /// Current score.
    pub score: i32,
    /// Scoring events participated in.
    pub score_events: u32,
}

/// A session of consecutive puzzles between an ordered set of contestants.
///
/// The match owns its contestants and the current puzzle; contestants are
/// referenced by [`ContestantId`] everywhere else. Turn order is randomized
/// once, lazily, on the first puzzle, then rotated.
pub struct Match {
    contestants: Vec<Contestant>,
    win_score: i32,
    puzzle: Option<Puzzle>,
    hyperghost: bool,
    minimum_word_length: usize,
    turn: Option<usize>,
    random: Box<dyn Randomizer>,
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("contestants", &self.contestants)
            .field("win_score", &self.win_score)
            .field("puzzle", &self.puzzle)
            .field("hyperghost", &self.hyperghost)
            .field("minimum_word_length", &self.minimum_word_length)
            .field("turn", &self.turn)
            .finish_non_exhaustive()
    }
}

/// Outcomes after which a hyperghost match gives up on the current letters
/// and deals fresh ones. Deliberately asymmetric: a not-a-match challenge
/// to a skip keeps the letters in play.
const FRESH_LETTER_OUTCOMES: [Outcome; 3] = [
    Outcome::Skipped,
    Outcome::ImprovedSkipNotAWord,
    Outcome::ImprovedSkipTooShort,
];

impl Match {
    /// Creates a match. Play order is decided lazily on the first puzzle.
    pub fn new(win_score: i32, contestants: Vec<Contestant>, random: Box<dyn Randomizer>) -> Self {
        Self {
            contestants,
            win_score,
            puzzle: None,
            hyperghost: false,
            minimum_word_length: Puzzle::DEFAULT_MINIMUM_WORD_LENGTH,
            turn: None,
            random,
        }
    }

    /// Score required to win the match.
    pub fn win_score(&self) -> i32 {
        self.win_score
    }

    /// Whether consecutive puzzles reuse letters until nobody can improve.
    pub fn hyperghost(&self) -> bool {
        self.hyperghost
    }

    /// Enables or disables the hyperghost continuation rule.
    pub fn set_hyperghost(&mut self, hyperghost: bool) {
        self.hyperghost = hyperghost;
    }

    /// Minimum word length applied to every new puzzle.
    pub fn minimum_word_length(&self) -> usize {
        self.minimum_word_length
    }

    /// Sets the minimum word length for subsequent puzzles.
    pub fn set_minimum_word_length(&mut self, length: usize) {
        self.minimum_word_length = length;
    }

    /// The contestants in play order (unordered until the first puzzle).
    pub fn contestants(&self) -> &[Contestant] {
        &self.contestants
    }

    /// Looks up a contestant by id.
    pub fn contestant(&self, id: ContestantId) -> Option<&Contestant> {
        self.contestants.get(id)
    }

    /// Mutable contestant lookup, for scoring and search driving.
    pub fn contestant_mut(&mut self, id: ContestantId) -> Option<&mut Contestant> {
        self.contestants.get_mut(id)
    }

    /// The puzzle currently in play.
    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    /// Mutable access to the puzzle in play.
    pub fn puzzle_mut(&mut self) -> Option<&mut Puzzle> {
        self.puzzle.as_mut()
    }

    /// Deals the next puzzle, discarding the previous one.
    ///
    /// The first call fixes a randomized contestant order; every call
    /// rotates ownership to the next contestant. Under hyperghost rules the
    /// previous letters are reused unless the previous outcome showed the
    /// letters were exhausted, in which case fresh letters are drawn.
    #[instrument(skip(self, words))]
    pub fn create_puzzle(&mut self, words: Arc<WordList>) -> &Puzzle {
        debug_assert!(!self.contestants.is_empty(), "match has no contestants");
        self.ensure_order();
        let turn = match self.turn {
            Some(turn) => (turn + 1) % self.contestants.len().max(1),
            None => 0,
        };
        self.turn = Some(turn);

        let (letters, previous_word) = match self.continuation() {
            Some(seed) => seed,
            None => (self.random.letters(&words), None),
        };
        info!(%letters, owner = turn, "dealing puzzle");

        let mut puzzle = Puzzle::new(letters, turn, words);
        puzzle.set_minimum_word_length(self.minimum_word_length);
        puzzle.set_previous_word(previous_word);
        self.puzzle.insert(puzzle)
    }

    /// The letters and previous-word seed to carry forward, when the
    /// hyperghost rule says to continue.
    fn continuation(&self) -> Option<(Letters, Option<String>)> {
        if !self.hyperghost {
            return None;
        }
        let previous = self.puzzle.as_ref()?;
        let result = previous.result();
        if FRESH_LETTER_OUTCOMES.contains(&result) {
            return None;
        }
        let carried = match result {
            Outcome::Longer | Outcome::Later | Outcome::WordFound => previous.response(),
            _ => previous.solution(),
        };
        Some((
            previous.letters(),
            carried.filter(|word| !word.is_empty()).map(str::to_string),
        ))
    }

    /// Fisher-Yates over the contestants, driven by the injected randomizer,
    /// run exactly once.
    fn ensure_order(&mut self) {
        if self.turn.is_some() || self.contestants.is_empty() {
            return;
        }
        let count = self.contestants.len();
        for fixed in 0..count.saturating_sub(1) {
            let chosen = self.random.starting_index(count - fixed);
            self.contestants.swap(fixed, fixed + chosen);
        }
        debug!(
            order = ?self.contestants.iter().map(Contestant::name).collect::<Vec<_>>(),
            "contestant order fixed"
        );
        // Point just before the start so the first rotation lands on the
        // first contestant.
        self.turn = Some(count - 1);
    }

    /// The winner, if the match has one.
    ///
    /// Requires every contestant to have the same number of scoring events,
    /// a unique strict maximum score, and that maximum at or above the win
    /// threshold. Any ambiguity yields `None`.
    pub fn winner(&self) -> Option<&Contestant> {
        let mut best: Option<&Contestant> = None;
        let mut tie = false;
        let mut events: Option<u32> = None;
        for contestant in &self.contestants {
            match events {
                None => events = Some(contestant.score_events()),
                Some(count) if count != contestant.score_events() => return None,
                Some(_) => {}
            }
            match best {
                None => best = Some(contestant),
                Some(leader) => {
                    if contestant.score() > leader.score() {
                        best = Some(contestant);
                        tie = false;
                    } else if contestant.score() == leader.score() {
                        tie = true;
                    }
                }
            }
        }
        best.filter(|leader| !tie && leader.score() >= self.win_score)
    }

    /// Serializable summary of every contestant's progress.
    pub fn standings(&self) -> Vec<Standing> {
        self.contestants
            .iter()
            .map(|contestant| Standing {
                name: contestant.name().to_string(),
                score: contestant.score(),
                score_events: contestant.score_events(),
            })
            .collect()
    }
}
