//! A single puzzle and the record of attempts made on it.

use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Feedback, PuzzleError, Result, Word};

/// The number of guesses a puzzle allows.
pub const MAX_ATTEMPTS: usize = 6;

/// A specific Wordle puzzle to solve.
///
/// The [test harness](crate::Harness) creates one of these for every target
/// word and checks each guess of an agent against it.
///
/// # Examples
///
/// ```rust
/// use wordle_agents::{Attempts, Puzzle, Word};
///
/// let puzzle = Puzzle::new("earth".parse()?);
/// let mut attempts = Attempts::new();
///
/// let feedback = puzzle.check(&"ratio".parse()?, &mut attempts)?;
/// assert_eq!(feedback.to_string(), "ygybb");
/// assert_eq!(attempts.len(), 1);
/// assert!(!attempts.solved());
/// #
/// # Ok::<_, wordle_agents::WordleError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Puzzle {
    word: Word,
}

impl Puzzle {
    /// Creates a new puzzle from a [`Word`].
    pub fn new(word: Word) -> Self {
        Puzzle { word }
    }

    /// The answer to this puzzle.
    pub fn word(&self) -> Word {
        self.word
    }

    /// Grades a guess and records it in `attempts`.
    ///
    /// If `attempts` already holds [`MAX_ATTEMPTS`] guesses, this returns an
    /// error and records nothing.
    pub fn check(&self, guess: &Word, attempts: &mut Attempts) -> Result<Feedback> {
        let feedback = Feedback::compute(guess, &self.word);
        attempts.push(*guess, feedback)?;
        Ok(feedback)
    }
}

/// The guesses made on one puzzle, with the feedback each received.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Attempts {
    inner: Vec<(Word, Feedback)>,
}

impl Attempts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attempt.
    ///
    /// This will return an error if `inner` already has six elements.
    pub(crate) fn push(&mut self, word: Word, feedback: Feedback) -> Result<usize> {
        if self.inner.len() < MAX_ATTEMPTS {
            self.inner.push((word, feedback));
            Ok(self.inner.len() - 1)
        } else {
            Err(PuzzleError::OutOfGuesses.into())
        }
    }

    /// Returns a slice into the underlying data.
    pub fn inner(&self) -> &[(Word, Feedback)] {
        self.inner.as_slice()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if no more guesses may be made.
    pub fn finished(&self) -> bool {
        self.inner.len() >= MAX_ATTEMPTS || self.solved()
    }

    /// Returns true if the last guess was correct.
    pub fn solved(&self) -> bool {
        matches!(self.inner.last(), Some((_, feedback)) if feedback.is_solved())
    }

    /// The score of these attempts: the number of guesses if solved,
    /// otherwise one more than the budget.
    pub fn score(&self) -> usize {
        if self.solved() {
            self.inner.len()
        } else {
            MAX_ATTEMPTS + 1
        }
    }
}

impl Display for Attempts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some((last, rest)) = self.inner.split_last() {
            for (word, feedback) in rest {
                writeln!(f, "{} {}", word, feedback)?;
            }
            write!(f, "{} {}", last.0, last.1)?;
        }
        Ok(())
    }
}
