//! Injected randomness for letter generation and turn order.
//!
//! All randomness flows through the [`Randomizer`] trait so tests can
//! supply deterministic sequences.

use crate::letters::Letters;
use crate::words::WordList;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of the randomness a match needs.
pub trait Randomizer {
    /// Draws three constraint letters, with the word list in view so
    /// implementations can bias toward solvable puzzles.
    fn letters(&mut self, words: &WordList) -> Letters;

    /// Picks a uniform index in `0..remaining` for the one-time contestant
    /// shuffle.
    fn starting_index(&mut self, remaining: usize) -> usize;
}

/// Default randomness: letters are sampled from a real word in the list, so
/// at least one solution always exists.
#[derive(Debug)]
pub struct FairRandom {
    rng: SmallRng,
}

impl FairRandom {
    /// Creates a randomizer seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Creates a reproducible randomizer from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn arbitrary_letters(&mut self) -> Letters {
        // Uppercase ASCII always validates, so this returns on the first
        // draw.
        loop {
            let triple = [(); 3].map(|_| (b'A' + self.rng.random_range(0..26)) as char);
            if let Ok(letters) = Letters::from_chars(triple) {
                return letters;
            }
        }
    }
}

impl Default for FairRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomizer for FairRandom {
    fn letters(&mut self, words: &WordList) -> Letters {
        if words.is_empty() {
            return self.arbitrary_letters();
        }
        let index = self.rng.random_range(0..words.len());
        let Some(word) = words.get(index) else {
            return self.arbitrary_letters();
        };
        let chars: Vec<char> = word.chars().collect();
        if chars.len() < 3 {
            return self.arbitrary_letters();
        }
        let interior = self.rng.random_range(1..chars.len() - 1);
        let triple = [chars[0], chars[interior], chars[chars.len() - 1]];
        Letters::from_chars(triple).unwrap_or_else(|_| self.arbitrary_letters())
    }

    fn starting_index(&mut self, remaining: usize) -> usize {
        if remaining <= 1 {
            0
        } else {
            self.rng.random_range(0..remaining)
        }
    }
}
