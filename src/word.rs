//! Validated five letter words.

use std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PuzzleError, Result, WordleError};

/// The number of letters in every word.
pub const WORD_LEN: usize = 5;

/// A five letter lowercase word.
///
/// Construction is validated, so every instance holds exactly
/// [`WORD_LEN`] ascii lowercase letters. Words order lexicographically,
/// which is the order every strategy uses to break ties.
///
/// # Examples
///
/// ```rust
/// use wordle_agents::Word;
///
/// let crate_ = "crate".parse::<Word>()?;
/// assert_eq!(&*crate_, "crate");
///
/// assert!("crates".parse::<Word>().is_err());
/// assert!("Crate".parse::<Word>().is_err());
/// #
/// # Ok::<_, wordle_agents::WordleError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", into = "String", try_from = "String")
)]
pub struct Word {
    letters: [u8; WORD_LEN],
}

impl Word {
    /// Creates a new [`Word`] from raw bytes.
    ///
    /// Returns an error unless every byte is an ascii lowercase letter.
    pub fn from_bytes(bytes: [u8; WORD_LEN]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_lowercase) {
            Ok(Word { letters: bytes })
        } else {
            Err(PuzzleError::InvalidWord(String::from_utf8_lossy(&bytes).into_owned()).into())
        }
    }

    /// The letters of the word, as ascii bytes.
    pub fn letters(&self) -> &[u8; WORD_LEN] {
        &self.letters
    }

    /// Returns the word as a string slice.
    pub fn as_str(&self) -> &str {
        // Always valid utf-8, construction only admits ascii.
        std::str::from_utf8(&self.letters).unwrap_or_default()
    }

    /// Returns true if `letter` occurs anywhere in the word.
    pub fn contains_letter(&self, letter: u8) -> bool {
        self.letters.contains(&letter)
    }

    /// Counts how many different letters the word uses.
    pub fn distinct_letters(&self) -> usize {
        let mut seen = 0_u32;
        for &c in &self.letters {
            seen |= 1 << (c - b'a');
        }
        seen.count_ones() as usize
    }
}

impl FromStr for Word {
    type Err = WordleError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes: [u8; WORD_LEN] = s
            .as_bytes()
            .try_into()
            .map_err(|_| PuzzleError::InvalidWord(s.to_string()))?;
        Word::from_bytes(bytes)
    }
}

impl TryFrom<String> for Word {
    type Error = WordleError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.as_str().to_string()
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Debug for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Word({})", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_lowercase_words() -> Result<()> {
        let word: Word = "sound".parse()?;
        assert_eq!(word.as_str(), "sound");
        assert_eq!(word.letters(), b"sound");
        Ok(())
    }

    #[test]
    fn rejects_bad_words() {
        for bad in ["", "soun", "sounds", "SOUND", "so nd", "sóund", "12345"] {
            assert!(bad.parse::<Word>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn counts_distinct_letters() -> Result<()> {
        assert_eq!("crane".parse::<Word>()?.distinct_letters(), 5);
        assert_eq!("sassy".parse::<Word>()?.distinct_letters(), 3);
        assert_eq!("aaaaa".parse::<Word>()?.distinct_letters(), 1);
        Ok(())
    }

    #[test]
    fn orders_lexicographically() -> Result<()> {
        let mut words: Vec<Word> = ["trace", "crate", "caret"]
            .iter()
            .map(|s| s.parse())
            .collect::<Result<_>>()?;
        words.sort();
        let sorted: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
        assert_eq!(sorted, ["caret", "crate", "trace"]);
        Ok(())
    }
}
