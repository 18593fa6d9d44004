//! Ultraghost - a turn-based word-duel engine.
//!
//! Contestants take turns solving letter-constraint puzzles: given three
//! letters, find a word that starts with the first, contains the second
//! somewhere strictly inside, and ends with the third. Shorter words beat
//! longer ones; ties break alphabetically. After the puzzle owner commits a
//! solution, the other contestants may challenge with a better word, and the
//! outcome of the exchange moves the owner's score.
//!
//! # Architecture
//!
//! - [`Letters`] and [`rules`] define the constraint and the ranking rule.
//! - [`Puzzle`] holds one exchange and judges it into an [`Outcome`].
//! - [`IncrementalSearch`] lets a computer contestant scan the word list a
//!   batch at a time, so thinking can be spread across timer ticks.
//! - [`Match`] owns the contestants, rotates puzzle ownership, and detects
//!   a fair winner.
//! - [`Controller`] drives a match against a [`Screen`] and a [`Scheduler`],
//!   both injected so the engine stays free of any particular UI or clock.
//! - [`insertion`] is a smaller sibling puzzle with a decaying score.
//!
//! ```
//! use ultraghost::{Letters, rules};
//!
//! let letters = Letters::new("pie")?;
//! assert!(rules::is_match("PIPE", letters));
//! assert!(!rules::is_match("PEAR", letters));
//! # Ok::<(), ultraghost::LettersError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contestant;
mod controller;
pub mod insertion;
mod letters;
mod outcome;
mod puzzle;
mod random;
pub mod rules;
mod search;
mod session;
mod words;

pub use contestant::{AutomatedSettings, Contestant, ContestantId, ContestantKind};
pub use controller::{
    Controller, ControllerError, Phase, SCORE_TICK_MILLIS, SEARCH_TICK_MILLIS, Scheduler, Screen,
    TaskHandle, TickTask,
};
pub use letters::{Letters, LettersError};
pub use outcome::Outcome;
pub use puzzle::{Puzzle, PuzzleEvent};
pub use random::{FairRandom, Randomizer};
pub use rules::Ranking;
pub use search::IncrementalSearch;
pub use session::{Match, Standing};
pub use words::WordList;
