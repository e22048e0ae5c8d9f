//! The feedback oracle and the candidate filter built on it.

use std::{collections::HashMap, fmt::Display, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PuzzleError, Result, Word, WordleError, WORD_LEN};

/// The number of distinct feedback codes, `3^WORD_LEN`.
pub const NUM_FEEDBACKS: usize = 243;

/// A Wordle "grade" that indicates the correctness of a letter in a guess.
///
/// `Correct` (green) means that the letter is in the correct position.
/// `Almost` (yellow) means that the letter is in the word, but not in that
/// position. `Incorrect` (black) means that the word does not contain any
/// more of that letter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Grade {
    /// A grade that indicates the letter guessed is in the correct position.
    Correct,

    /// A grade that indicates the letter guessed is in the word, but not there.
    Almost,

    /// A grade that indicates the letter guesses is not in the word.
    Incorrect,
}

impl Grade {
    /// The class of this grade: 0 for black, 1 for yellow and 2 for green.
    pub fn class(&self) -> usize {
        match self {
            Grade::Incorrect => 0,
            Grade::Almost => 1,
            Grade::Correct => 2,
        }
    }

    /// The character used for this grade in feedback strings.
    pub fn symbol(&self) -> char {
        match self {
            Grade::Correct => 'g',
            Grade::Almost => 'y',
            Grade::Incorrect => 'b',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'g' => Some(Grade::Correct),
            'y' => Some(Grade::Almost),
            'b' => Some(Grade::Incorrect),
            _ => None,
        }
    }
}

/// The grades of every letter of a guess against some target.
///
/// Feedback formats as five characters, `g` for green, `y` for yellow and
/// `b` for black, and can be parsed back from that form.
///
/// # Examples
///
/// ```rust
/// use wordle_agents::{Feedback, Word};
///
/// let guess: Word = "crate".parse()?;
/// let target: Word = "trace".parse()?;
/// assert_eq!(Feedback::compute(&guess, &target).to_string(), "yggyg");
/// assert!(Feedback::compute(&target, &target).is_solved());
/// #
/// # Ok::<_, wordle_agents::WordleError>(())
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Feedback {
    grades: [Grade; WORD_LEN],
}

impl Feedback {
    /// Creates feedback from explicit grades.
    pub fn new(grades: [Grade; WORD_LEN]) -> Self {
        Feedback { grades }
    }

    /// Grades `guess` against `target`.
    ///
    /// Greens are assigned first and consume their target letter. Every other
    /// position then takes the leftmost target letter that is still
    /// unconsumed and equal to it, turning yellow, or stays black. A single
    /// target letter is therefore never counted twice, no matter how often
    /// the guess repeats it.
    pub fn compute(guess: &Word, target: &Word) -> Self {
        let guess = guess.letters();
        let target = target.letters();

        let mut grades = [Grade::Incorrect; WORD_LEN];
        let mut used = [false; WORD_LEN];

        for i in 0..WORD_LEN {
            if guess[i] == target[i] {
                grades[i] = Grade::Correct;
                used[i] = true;
            }
        }

        for i in 0..WORD_LEN {
            if grades[i] == Grade::Correct {
                continue;
            }
            if let Some(j) = (0..WORD_LEN).find(|&j| !used[j] && target[j] == guess[i]) {
                grades[i] = Grade::Almost;
                used[j] = true;
            }
        }

        Feedback { grades }
    }

    /// The grades, one per letter of the guess.
    pub fn grades(&self) -> &[Grade; WORD_LEN] {
        &self.grades
    }

    /// Returns true if every letter is green.
    pub fn is_solved(&self) -> bool {
        self.grades.iter().all(|&g| g == Grade::Correct)
    }

    /// A dense index in `0..NUM_FEEDBACKS`, reading the grades as a base 3
    /// number.
    pub fn index(&self) -> usize {
        self.grades.iter().fold(0, |acc, g| acc * 3 + g.class())
    }

    /// The feedback of a correct guess.
    pub fn solved() -> Self {
        Feedback {
            grades: [Grade::Correct; WORD_LEN],
        }
    }
}

impl FromStr for Feedback {
    type Err = WordleError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PuzzleError::InvalidFeedback(s.to_string());
        if s.chars().count() != WORD_LEN {
            return Err(invalid().into());
        }

        let mut grades = [Grade::Incorrect; WORD_LEN];
        for (grade, c) in grades.iter_mut().zip(s.chars()) {
            *grade = Grade::from_symbol(c).ok_or_else(invalid)?;
        }
        Ok(Feedback { grades })
    }
}

impl Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for grade in &self.grades {
            write!(f, "{}", grade.symbol())?;
        }
        Ok(())
    }
}

/// Returns true if `word` could still be the answer after `guess` was graded
/// `feedback`.
///
/// A word is consistent exactly when grading `guess` against it reproduces
/// `feedback`, which accounts for repeated letters the same way the oracle
/// does.
pub fn matches(guess: &Word, feedback: &Feedback, word: &Word) -> bool {
    Feedback::compute(guess, word) == *feedback
}

/// A memo of oracle results for one session.
///
/// Owned by an [`Agent`](crate::Agent) and cleared whenever it resets, so
/// no results leak between games.
#[derive(Debug, Clone, Default)]
pub struct FeedbackCache {
    inner: HashMap<(Word, Word), Feedback>,
}

impl FeedbackCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grades `guess` against `target`, reusing an earlier result if there
    /// is one.
    pub fn compute(&mut self, guess: &Word, target: &Word) -> Feedback {
        *self
            .inner
            .entry((*guess, *target))
            .or_insert_with(|| Feedback::compute(guess, target))
    }

    /// The cached form of [`matches()`].
    pub fn matches(&mut self, guess: &Word, feedback: &Feedback, word: &Word) -> bool {
        self.compute(guess, word) == *feedback
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
