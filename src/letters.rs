//! The three-letter constraint a valid word must satisfy.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rejected constraint input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("puzzle letters must be exactly 3 ASCII letters, got {input:?}")]
pub struct LettersError {
    /// The input that failed validation.
    pub input: String,
}

/// An ordered triple of uppercase letters.
///
/// A valid solution starts with the first letter, ends with the last letter,
/// and contains the middle letter somewhere strictly inside. Construction
/// normalizes to uppercase and fails on anything other than exactly three
/// ASCII alphabetic characters; the length rules elsewhere in the engine
/// count bytes, which only agrees with letter counts for ASCII words (see
/// [`crate::words`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Letters([char; 3]);

impl Letters {
    /// Creates a constraint from a three-character string.
    ///
    /// # Errors
    ///
    /// Returns [`LettersError`] unless the input is exactly three alphabetic
    /// characters.
    pub fn new(input: &str) -> Result<Self, LettersError> {
        let chars: Vec<char> = input.chars().collect();
        match <[char; 3]>::try_from(chars) {
            Ok(triple) => Self::from_chars(triple),
            Err(_) => Err(LettersError {
                input: input.to_string(),
            }),
        }
    }

    /// Creates a constraint from three characters already in hand.
    ///
    /// # Errors
    ///
    /// Returns [`LettersError`] if any character is not an ASCII letter.
    pub fn from_chars(chars: [char; 3]) -> Result<Self, LettersError> {
        if chars.iter().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(chars.map(|c| c.to_ascii_uppercase())))
        } else {
            Err(LettersError {
                input: chars.iter().collect(),
            })
        }
    }

    /// The letter a solution must start with.
    pub fn first(&self) -> char {
        self.0[0]
    }

    /// The letter that must appear strictly inside a solution.
    pub fn middle(&self) -> char {
        self.0[1]
    }

    /// The letter a solution must end with.
    pub fn last(&self) -> char {
        self.0[2]
    }
}

impl fmt::Display for Letters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for Letters {
    type Err = LettersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
