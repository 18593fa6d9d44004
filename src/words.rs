//! The word list collaborator.
//!
//! An immutable, shared-read snapshot for the duration of a match: membership
//! lookups are case-normalized, and iteration follows load order, which is
//! what gives [`crate::puzzle::Puzzle::find_next_better`] its first-match
//! semantics.
//!
//! Word lists are expected to be ASCII. Constraint letters only accept ASCII,
//! and every length rule in the engine (the load filter, the minimum word
//! length, ranking) counts bytes, which matches letter counts for ASCII
//! words only. Non-ASCII entries are carried but rank by byte length.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Words too short to ever solve a puzzle are dropped at load time.
const MINIMUM_LOAD_LENGTH: usize = 4;

/// A dictionary of uppercase words in a fixed load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
    index: HashSet<String>,
}

impl WordList {
    /// Creates an empty word list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a word list from a line-oriented source, one word per line.
    ///
    /// Words are uppercased; lines shorter than four characters are
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while reading lines.
    pub fn from_reader(reader: impl BufRead) -> io::Result<Self> {
        let mut list = Self::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.len() >= MINIMUM_LOAD_LENGTH {
                list.push(word);
            }
        }
        info!(words = list.len(), "loaded word list");
        Ok(list)
    }

    /// Reads a word list from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from opening or reading the file.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Builds a word list directly from words, preserving their order.
    /// Handy for tests and for the insertion-puzzle solver.
    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut list = Self::new();
        for word in words {
            list.push(word.as_ref());
        }
        list
    }

    fn push(&mut self, word: &str) {
        let upper = word.to_uppercase();
        if self.index.insert(upper.clone()) {
            self.words.push(upper);
        }
    }

    /// Case-normalized membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(&word.to_uppercase())
    }

    /// The word at the given load-order position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Number of words in the list.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates the words in load order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
