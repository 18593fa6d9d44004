//! Resumable, anytime search over the word list.
//!
//! An automated contestant "thinks" by advancing one of these sessions a
//! batch at a time across scheduler ticks instead of blocking on a full
//! scan. The best word found so far only ever improves.

use crate::letters::Letters;
use crate::rules;
use crate::words::WordList;
use tracing::{debug, trace};

/// A cancellable search session scanning for the best matching word.
///
/// "Best" is shortest first, then alphabetically earliest, per
/// [`rules::rank`]. One session exists per searching contestant per puzzle;
/// sessions never share state.
#[derive(Debug, Clone)]
pub struct IncrementalSearch {
    cursor: usize,
    best: Option<String>,
    batch_size: usize,
    max_batches: Option<usize>,
    batches_run: usize,
}

impl IncrementalSearch {
    /// Creates a session examining `batch_size` words per advance, giving up
    /// after `max_batches` advances when a cap is set.
    pub fn new(batch_size: usize, max_batches: Option<usize>) -> Self {
        Self {
            cursor: 0,
            best: None,
            batch_size: batch_size.max(1),
            max_batches,
            batches_run: 0,
        }
    }

    /// The best matching word found so far.
    pub fn best(&self) -> Option<&str> {
        self.best.as_deref()
    }

    /// Consumes the best word found so far, leaving the session spent.
    pub fn take_best(&mut self) -> Option<String> {
        self.best.take()
    }

    /// How many words have been examined.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Examines up to one batch of words and reports whether the search is
    /// finished.
    ///
    /// Finished means the cursor reached the end of the list or the batch
    /// cap was exhausted. Calling `advance` on a finished session stays
    /// finished without examining anything.
    pub fn advance(&mut self, letters: Letters, minimum_word_length: usize, words: &WordList) -> bool {
        if self.max_batches.is_some_and(|cap| self.batches_run >= cap) {
            return true;
        }
        let end = (self.cursor + self.batch_size).min(words.len());
        while self.cursor < end {
            if let Some(word) = words.get(self.cursor) {
                self.consider(word, letters, minimum_word_length);
            }
            self.cursor += 1;
        }
        self.batches_run += 1;
        let finished = self.cursor >= words.len()
            || self.max_batches.is_some_and(|cap| self.batches_run >= cap);
        trace!(
            cursor = self.cursor,
            batches = self.batches_run,
            finished,
            "search batch"
        );
        finished
    }

    fn consider(&mut self, word: &str, letters: Letters, minimum_word_length: usize) {
        if word.len() < minimum_word_length || !rules::is_match(word, letters) {
            return;
        }
        let improves = match self.best.as_deref() {
            None => true,
            Some(best) => rules::rank(word, best).is_improvement(),
        };
        if improves {
            debug!(word, "new best so far");
            self.best = Some(word.to_string());
        }
    }
}
