//! Letter counting helpers shared by the frequency based strategies.

use std::{collections::HashMap, ops::Deref};

use itertools::Itertools;
use wordle_agents::Word;

/// The number of letters in the alphabet.
pub const ALPHABET: usize = 26;

/// How many times each letter appears in a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LetterCounts {
    counts: [u8; ALPHABET],
}

impl LetterCounts {
    /// Counts the letters of `word`.
    pub fn of(word: &Word) -> Self {
        let mut counts = [0; ALPHABET];
        for &letter in word.letters() {
            counts[index(letter)] += 1;
        }
        LetterCounts { counts }
    }
}

impl Deref for LetterCounts {
    type Target = [u8; ALPHABET];

    fn deref(&self) -> &Self::Target {
        &self.counts
    }
}

/// The position of a lowercase ascii letter in the alphabet.
///
/// [`Word`] only holds lowercase ascii letters, so every letter of a word
/// maps into `0..ALPHABET`.
pub fn index(letter: u8) -> usize {
    (letter - b'a') as usize
}

/// Letter counts for every word of a vocabulary, built once.
#[derive(Debug, Clone, Default)]
pub struct LetterTable {
    table: HashMap<Word, LetterCounts>,
}

impl LetterTable {
    /// Counts the letters of every word in `vocabulary`.
    pub fn new<'a>(vocabulary: impl IntoIterator<Item = &'a Word>) -> Self {
        LetterTable {
            table: vocabulary
                .into_iter()
                .map(|word| (*word, LetterCounts::of(word)))
                .collect(),
        }
    }

    /// The letter counts of `word`, counting them now if the word was not in
    /// the vocabulary.
    pub fn get(&self, word: &Word) -> LetterCounts {
        self.table
            .get(word)
            .copied()
            .unwrap_or_else(|| LetterCounts::of(word))
    }

    /// The number of words in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the table holds no words.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Sums the letter counts of `words`, counting every occurrence.
    pub fn frequencies<'a>(&self, words: impl IntoIterator<Item = &'a Word>) -> [u32; ALPHABET] {
        let mut freq = [0; ALPHABET];
        for word in words {
            for (total, &n) in freq.iter_mut().zip(self.get(word).iter()) {
                *total += n as u32;
            }
        }
        freq
    }
}

/// Scores `word` by adding the frequency of each of its distinct letters.
pub fn frequency_score(word: &Word, freq: &[u32; ALPHABET]) -> u32 {
    word.letters()
        .iter()
        .unique()
        .map(|&letter| freq[index(letter)])
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn counts_repeated_letters() {
        let counts = LetterCounts::of(&word("sassy"));
        assert_eq!(counts[index(b's')], 3);
        assert_eq!(counts[index(b'a')], 1);
        assert_eq!(counts[index(b'y')], 1);
        assert_eq!(counts.iter().filter(|&&n| n > 0).count(), 3);
    }

    #[test]
    fn frequencies_count_every_occurrence() {
        let words = [word("sassy"), word("sissy")];
        let table = LetterTable::new(&words);
        let freq = table.frequencies(&words);
        assert_eq!(freq[index(b's')], 6);
        assert_eq!(freq[index(b'i')], 1);
        assert_eq!(freq[index(b'y')], 2);
        assert_eq!(freq[index(b'z')], 0);
    }

    #[test]
    fn score_counts_each_letter_once() {
        let words = [word("sassy"), word("sissy")];
        let freq = LetterTable::new(&words).frequencies(&words);
        // s + a + y
        assert_eq!(frequency_score(&word("sassy"), &freq), 6 + 1 + 2);
    }

    #[test]
    fn unknown_words_are_counted_on_demand() {
        let table = LetterTable::new(&[word("crate")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&word("sound")), LetterCounts::of(&word("sound")));
    }
}
