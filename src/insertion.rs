//! The word-insertion puzzle family: splice one target word into the other
//! and race a decaying clock.
//!
//! A smaller cousin of the letter-constraint duel. The clue carries two
//! target words (flagged with `*stars*` when the clue has extra prose); the
//! player picks which word receives the other and at which character, and
//! the score halves every ten seconds until the puzzle is solved.

use crate::words::WordList;
use derive_more::{Display, Error};
use tracing::debug;

/// Score starts here and halves every [`HALF_LIFE_SECONDS`].
const FULL_SCORE: f64 = 100.0;

/// Seconds for the score to halve.
const HALF_LIFE_SECONDS: f64 = 10.0;

/// Floor so a slow solve still scores something.
const SCORE_FLOOR: f64 = 0.000101;

/// Errors from the insertion puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InsertionError {
    /// A clue needs at least two words.
    #[display("clue must contain at least two words")]
    MalformedClue,
    /// Combination requested before both targets were chosen.
    #[display("target word and character are not set")]
    TargetNotSet,
    /// The character index is meaningless without a target word.
    #[display("target character set before target word")]
    CharacterBeforeWord,
    /// No insertion of either target into the other is in the word list.
    #[display("no combination of the targets appears in the word list")]
    NoSolution,
}

/// One insertion puzzle: a clue, two targets, and a decaying score.
#[derive(Debug, Clone)]
pub struct Puzzle {
    clue: String,
    targets: [String; 2],
    target_word: Option<usize>,
    target_character: Option<usize>,
    solved: bool,
    delay: f64,
    total_score: f64,
}

impl Puzzle {
    /// Parses a clue. Words flagged `*like*` become the targets with
    /// punctuation stripped; a bare two-word clue displays no clue text at
    /// all.
    ///
    /// # Errors
    ///
    /// Returns [`InsertionError::MalformedClue`] when fewer than two words
    /// are present.
    pub fn new(clue: &str) -> Result<Self, InsertionError> {
        Self::with_total(clue, 0.0)
    }

    /// Parses a clue, carrying forward the running total from the previous
    /// puzzle in the series.
    ///
    /// # Errors
    ///
    /// Returns [`InsertionError::MalformedClue`] when fewer than two words
    /// are present.
    pub fn chained(clue: &str, previous: &Puzzle) -> Result<Self, InsertionError> {
        Self::with_total(clue, previous.total_score())
    }

    fn with_total(clue: &str, total_score: f64) -> Result<Self, InsertionError> {
        let mut words: Vec<String> = clue.split_whitespace().map(String::from).collect();
        if words.len() < 2 {
            return Err(InsertionError::MalformedClue);
        }
        // Starred words move to the front, in order, stripped of
        // punctuation; the first two words are then the targets.
        let mut target_position = 0;
        for index in 0..words.len() {
            if words[index].starts_with('*') {
                let cleaned: String = words[index].chars().filter(|c| c.is_alphanumeric()).collect();
                words[target_position] = cleaned;
                target_position += 1;
            }
        }
        let targets = [words[0].to_uppercase(), words[1].to_uppercase()];
        let clue = if words.len() == 2 {
            String::new()
        } else {
            clue.to_string()
        };
        Ok(Self {
            clue,
            targets,
            target_word: None,
            target_character: None,
            solved: false,
            delay: 0.0,
            total_score,
        })
    }

    /// The displayed clue text, empty for a bare two-word clue.
    pub fn clue(&self) -> &str {
        &self.clue
    }

    /// One of the two target words, uppercased.
    pub fn target(&self, index: usize) -> &str {
        &self.targets[index.min(1)]
    }

    /// Whether the player has marked this puzzle solved.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Whether both the target word and character have been chosen.
    pub fn is_target_set(&self) -> bool {
        self.target_word.is_some() && self.target_character.is_some()
    }

    /// Chooses which target word receives the other.
    pub fn set_target_word(&mut self, target_word: usize) {
        self.target_word = Some(target_word.min(1));
    }

    /// Chooses the character the other word is inserted before.
    ///
    /// # Errors
    ///
    /// Returns [`InsertionError::CharacterBeforeWord`] if no target word has
    /// been chosen yet.
    pub fn set_target_character(&mut self, target_character: usize) -> Result<(), InsertionError> {
        if self.target_word.is_none() {
            return Err(InsertionError::CharacterBeforeWord);
        }
        self.target_character = Some(target_character);
        Ok(())
    }

    /// Forgets the target selection.
    pub fn clear_targets(&mut self) {
        self.target_word = None;
        self.target_character = None;
    }

    /// Marks the puzzle solved (or not), banking the current score into the
    /// running total when solved.
    pub fn set_solved(&mut self, solved: bool) {
        self.solved = solved;
        if solved {
            self.total_score += self.score();
            debug!(total = self.total_score, "insertion puzzle solved");
        }
    }

    /// The selected combination: one target spliced into the other.
    ///
    /// # Errors
    ///
    /// Returns [`InsertionError::TargetNotSet`] unless both targets are set.
    pub fn combination(&self) -> Result<String, InsertionError> {
        let (Some(word), Some(character)) = (self.target_word, self.target_character) else {
            return Err(InsertionError::TargetNotSet);
        };
        Ok(Self::splice(&self.targets[word], &self.targets[(word + 1) % 2], character))
    }

    fn splice(outer: &str, inner: &str, at: usize) -> String {
        let at = at.min(outer.len());
        format!("{}{}{}", &outer[..at], inner, &outer[at..])
    }

    /// The current score: starts at 100 and halves every ten seconds of
    /// unsolved delay, floored to two significant digits (three at or above
    /// 100) and never below a tiny positive floor.
    pub fn score(&self) -> f64 {
        // exp2 keeps whole half-lives exact, so 50 never floors to 49.
        let raw = (FULL_SCORE * (-self.delay / HALF_LIFE_SECONDS).exp2()).max(SCORE_FLOOR);
        let digits = if raw >= FULL_SCORE { 3 } else { 2 };
        floor_to_significant(raw, digits)
    }

    /// Accrues unsolved delay and returns the refreshed score display.
    pub fn adjust_score(&mut self, seconds: f64) -> String {
        if !self.solved {
            self.delay += seconds;
        }
        self.score_display()
    }

    /// The current score, formatted for display.
    pub fn score_display(&self) -> String {
        display_score(self.score())
    }

    /// The running total across the series, including this puzzle only once
    /// solved.
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// The running total, formatted for display.
    pub fn total_score_display(&self) -> String {
        display_score(self.total_score)
    }

    /// Finds the first insertion of either target into the other that the
    /// word list recognizes.
    ///
    /// # Errors
    ///
    /// Returns [`InsertionError::NoSolution`] when no combination is a
    /// word.
    pub fn find_solution(&self, words: &WordList) -> Result<String, InsertionError> {
        for word in 0..2 {
            let outer = &self.targets[word];
            let inner = &self.targets[(word + 1) % 2];
            for at in 0..=outer.len() {
                let combination = Self::splice(outer, inner, at);
                if words.contains(&combination) {
                    return Ok(combination);
                }
            }
        }
        Err(InsertionError::NoSolution)
    }
}

/// Floors a positive value to the given number of significant digits.
fn floor_to_significant(value: f64, digits: i32) -> f64 {
    if value <= 0.0 {
        return 0.0;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - magnitude);
    (value * factor).floor() / factor
}

/// Renders a score without trailing noise: integers print bare.
fn display_score(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
