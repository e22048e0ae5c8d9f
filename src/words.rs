//! Loading word lists.
//!
//! Word lists are plain text with one word per line. Only entries of exactly
//! [`WORD_LEN`](crate::WORD_LEN) ascii letters survive; everything else is
//! skipped. Order and duplicates are preserved, [`Agent`](crate::Agent)
//! sorts and deduplicates its own copy.

use std::{fs, path::Path};

use log::debug;

use crate::{Result, Word};

/// Parses a newline-delimited word list.
///
/// # Examples
///
/// ```rust
/// use wordle_agents::words::parse_word_list;
///
/// let words = parse_word_list("crate\n  Trace \nfoo\nsassy\n");
/// let words: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
/// assert_eq!(words, ["crate", "trace", "sassy"]);
/// ```
pub fn parse_word_list(contents: &str) -> Vec<Word> {
    contents
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter_map(|line| line.parse().ok())
        .collect()
}

/// Reads and parses the word list at `path`.
pub fn load_word_list(path: impl AsRef<Path>) -> Result<Vec<Word>> {
    let path = path.as_ref();
    let words = parse_word_list(&fs::read_to_string(path)?);
    debug!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
