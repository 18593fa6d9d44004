//! Contestants: the people and machines playing the match.

use crate::letters::Letters;
use crate::rules;
use crate::search::IncrementalSearch;
use crate::words::WordList;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Index of a contestant within its match. Contestants are referenced by
/// id, never owned by the puzzles that mention them.
pub type ContestantId = usize;

/// Tuning for an automated contestant's search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatedSettings {
    /// Words examined per search tick.
    pub batch_size: usize,
    /// Cap on search ticks per puzzle; `None` scans the whole list.
    pub max_batches: Option<usize>,
}

impl Default for AutomatedSettings {
    fn default() -> Self {
        Self {
            batch_size: 1,
            max_batches: None,
        }
    }
}

/// What kind of player a contestant is.
///
/// A tagged variant rather than a class hierarchy: automated behavior is
/// just the variant that owns an [`IncrementalSearch`].
#[derive(Debug, Clone)]
pub enum ContestantKind {
    /// A human whose answers arrive through the controller.
    Interactive,
    /// A computer opponent that thinks across scheduler ticks.
    Automated {
        /// Search tuning.
        settings: AutomatedSettings,
        /// The live search session for the current puzzle, if any.
        search: Option<IncrementalSearch>,
    },
}

/// One player in a match: a name, a running score, and how they play.
#[derive(Debug, Clone)]
pub struct Contestant {
    name: String,
    score: i32,
    score_events: u32,
    kind: ContestantKind,
}

impl Contestant {
    /// Creates a human contestant.
    pub fn interactive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            score_events: 0,
            kind: ContestantKind::Interactive,
        }
    }

    /// Creates a computer contestant with the given search tuning.
    pub fn automated(name: impl Into<String>, settings: AutomatedSettings) -> Self {
        Self {
            name: name.into(),
            score: 0,
            score_events: 0,
            kind: ContestantKind::Automated {
                settings,
                search: None,
            },
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current score.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// How many scoring events this contestant has participated in. Winner
    /// detection requires these to be equal across the match.
    pub fn score_events(&self) -> u32 {
        self.score_events
    }

    /// Whether this contestant searches on its own.
    pub fn is_automated(&self) -> bool {
        matches!(self.kind, ContestantKind::Automated { .. })
    }

    /// Whether a search session is currently live.
    pub fn is_searching(&self) -> bool {
        matches!(
            self.kind,
            ContestantKind::Automated {
                search: Some(_),
                ..
            }
        )
    }

    /// Credits a score delta and counts the scoring event.
    pub fn add_score(&mut self, delta: i32) {
        self.score += delta;
        self.score_events += 1;
        debug!(name = %self.name, delta, score = self.score, "score adjusted");
    }

    /// Opens a fresh search session for the current puzzle. Interactive
    /// contestants never search; returns whether a session was started.
    pub fn begin_search(&mut self) -> bool {
        match &mut self.kind {
            ContestantKind::Interactive => false,
            ContestantKind::Automated { settings, search } => {
                *search = Some(IncrementalSearch::new(
                    settings.batch_size,
                    settings.max_batches,
                ));
                true
            }
        }
    }

    /// Advances the live search session by one batch. Returns true when the
    /// search is finished or there is nothing to search.
    pub fn run_search_batch(
        &mut self,
        letters: Letters,
        minimum_word_length: usize,
        words: &WordList,
    ) -> bool {
        match &mut self.kind {
            ContestantKind::Automated {
                search: Some(search),
                ..
            } => search.advance(letters, minimum_word_length, words),
            _ => true,
        }
    }

    /// Takes the best word the live session found, dropping the session.
    pub fn take_best(&mut self) -> Option<String> {
        match &mut self.kind {
            ContestantKind::Automated { search, .. } => {
                search.take().and_then(|mut s| s.take_best())
            }
            ContestantKind::Interactive => None,
        }
    }

    /// Discards any in-flight search state without applying it.
    pub fn abandon_search(&mut self) {
        if let ContestantKind::Automated { search, .. } = &mut self.kind {
            *search = None;
        }
    }

    /// Decides this contestant's challenge to the standing solution.
    ///
    /// Automated contestants offer their best found word when it beats the
    /// solution (or when the owner skipped and anything was found), and
    /// decline with an explicit empty response otherwise. Interactive
    /// contestants return `None`; their challenge arrives through the
    /// controller.
    pub fn counter_offer(&mut self, solution: Option<&str>) -> Option<String> {
        if !self.is_automated() {
            return None;
        }
        let best = self.take_best();
        let offer = match best {
            None => String::new(),
            Some(word) => match solution {
                None | Some("") => word,
                Some(standing) => {
                    if rules::rank(&word, standing).is_improvement() {
                        word
                    } else {
                        String::new()
                    }
                }
            },
        };
        debug!(name = %self.name, offer = %offer, "counter offer prepared");
        Some(offer)
    }
}
