//! Shared test helpers.

#![allow(dead_code)]

use ultraghost::{Letters, Randomizer, WordList};

/// Deterministic randomizer fed from fixed scripts, so tests control both
/// the dealt letters and the contestant shuffle.
pub struct ScriptedRandom {
    letters: Vec<Letters>,
    indices: Vec<usize>,
}

impl ScriptedRandom {
    /// Scripts are consumed front to back; indices fall back to 0 when
    /// exhausted.
    pub fn new(letters: &[&str], indices: &[usize]) -> Self {
        Self {
            letters: letters
                .iter()
                .rev()
                .map(|input| Letters::new(input).unwrap())
                .collect(),
            indices: indices.iter().rev().copied().collect(),
        }
    }
}

impl Randomizer for ScriptedRandom {
    fn letters(&mut self, _words: &WordList) -> Letters {
        self.letters.pop().expect("letters script exhausted")
    }

    fn starting_index(&mut self, _remaining: usize) -> usize {
        self.indices.pop().unwrap_or(0)
    }
}
