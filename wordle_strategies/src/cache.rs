//! Stored opening scores for [`Entropy`](crate::Entropy).
//!
//! Scoring the full vocabulary before the first guess is by far the most
//! expensive round, and its result only depends on the vocabulary. The
//! scores are kept in a plain text file, one `word: score` entry per line,
//! best first.
//!
//! The file is read and written without locking. Processes sharing one cache
//! path have to be serialized by the caller.

use std::{
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;
use wordle_agents::{CacheError, Result, Word};

/// Entropy scores sorted best first.
///
/// Entries are ordered by descending score, and equal scores by ascending
/// word, so the first entry that passes a filter is the preferred guess.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreTable {
    entries: Vec<(Word, f64)>,
}

impl ScoreTable {
    /// Builds a table from unsorted scores.
    pub fn new(scores: impl IntoIterator<Item = (Word, f64)>) -> Self {
        let mut entries: Vec<(Word, f64)> = scores.into_iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ScoreTable { entries }
    }

    /// Parses the contents of a cache file.
    ///
    /// Blank lines are skipped. Any other line that is not a word, a colon
    /// and a finite number is an error naming the line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wordle_strategies::ScoreTable;
    ///
    /// let table = ScoreTable::parse("trace: 1.5\ncrate: 2.25\n")?;
    /// assert_eq!(table.best().map(|(w, _)| w.to_string()), Some("crate".into()));
    /// assert!(ScoreTable::parse("crate 2.25").is_err());
    /// #
    /// # Ok::<_, wordle_agents::WordleError>(())
    /// ```
    pub fn parse(contents: &str) -> Result<Self> {
        let mut scores = Vec::new();
        for (i, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let malformed = || CacheError::MalformedEntry {
                line: i + 1,
                content: line.to_string(),
            };
            let (word, score) = line.split_once(':').ok_or_else(malformed)?;
            let word: Word = word.trim().parse().map_err(|_| malformed())?;
            let score: f64 = score
                .trim()
                .parse()
                .ok()
                .filter(|score: &f64| score.is_finite())
                .ok_or_else(malformed)?;
            scores.push((word, score));
        }
        Ok(Self::new(scores))
    }

    /// Reads a cache file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(CacheError::from)?;
        let table = Self::parse(&contents)?;
        info!(
            "loaded {} opening scores from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Writes the table to a cache file, replacing it if it exists.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path).map_err(CacheError::from)?);
        write!(writer, "{}", self).map_err(CacheError::from)?;
        writer.flush().map_err(CacheError::from)?;
        info!("wrote {} opening scores to {}", self.len(), path.display());
        Ok(())
    }

    /// The best scoring entry.
    pub fn best(&self) -> Option<(Word, f64)> {
        self.entries.first().copied()
    }

    /// The best scoring entry whose word is in `candidates`.
    ///
    /// `candidates` must be sorted.
    pub fn best_in(&self, candidates: &[Word]) -> Option<(Word, f64)> {
        self.entries
            .iter()
            .find(|(word, _)| candidates.binary_search(word).is_ok())
            .copied()
    }

    /// The score of `word`, if the table has one.
    pub fn get(&self, word: &Word) -> Option<f64> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|&(_, score)| score)
    }

    /// Every entry, best first.
    pub fn entries(&self) -> &[(Word, f64)] {
        &self.entries
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for ScoreTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (word, score) in &self.entries {
            writeln!(f, "{}: {}", word, score)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use wordle_agents::WordleError;

    use super::*;

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn sorts_by_score_then_word() {
        let table = ScoreTable::new([
            (word("trace"), 1.0),
            (word("slate"), 2.0),
            (word("crate"), 2.0),
            (word("sound"), 0.5),
        ]);
        let order: Vec<String> = table.entries().iter().map(|(w, _)| w.to_string()).collect();
        assert_eq!(order, ["crate", "slate", "trace", "sound"]);
        assert_eq!(table.best(), Some((word("crate"), 2.0)));
    }

    #[test]
    fn best_in_skips_missing_words() {
        let table = ScoreTable::new([(word("crate"), 2.0), (word("trace"), 1.0)]);
        assert_eq!(table.best_in(&[word("sound"), word("trace")]), Some((word("trace"), 1.0)));
        assert_eq!(table.best_in(&[word("sound")]), None);
        assert_eq!(table.get(&word("trace")), Some(1.0));
    }

    #[test]
    fn file_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("entropy.txt");
        let table = ScoreTable::new([(word("crate"), 5.837_512_3), (word("sound"), 0.1)]);

        table.save(&path)?;
        let contents = std::fs::read_to_string(&path)?;
        assert_eq!(contents, "crate: 5.8375123\nsound: 0.1\n");
        assert_eq!(ScoreTable::load(&path)?, table);
        Ok(())
    }

    #[test]
    fn parse_tolerates_spacing_and_blank_lines() -> Result<()> {
        let table = ScoreTable::parse("  sound :0.5\n\ncrate:   3\n   \n")?;
        assert_eq!(table.entries(), &[(word("crate"), 3.0), (word("sound"), 0.5)]);
        Ok(())
    }

    #[test]
    fn malformed_lines_are_reported() {
        for (contents, bad) in [
            ("crate: 1.0\ntrace 2.0\n", 2),
            ("crate: high\n", 1),
            ("\n\ncrates: 1.0", 3),
            ("crate: NaN\n", 1),
            ("crate: 1.0\ntrace: inf\n", 2),
            ("sound: -infinity", 1),
        ] {
            match ScoreTable::parse(contents) {
                Err(WordleError::Cache {
                    kind: CacheError::MalformedEntry { line, .. },
                }) => assert_eq!(line, bad),
                other => panic!("expected a malformed entry, got {:?}", other),
            }
        }
    }

    #[test]
    fn missing_file_is_an_io_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(matches!(
            ScoreTable::load(dir.path().join("missing.txt")),
            Err(WordleError::Cache {
                kind: CacheError::Io(_)
            })
        ));
        Ok(())
    }
}
