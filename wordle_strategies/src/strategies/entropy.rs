use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use wordle_agents::{strategy::best_by_key, AgentError, GameState, Result, Strategy, Word};

use crate::{EntropyDispatcher, ScoreTable};

/// A strategy that guesses the candidate expected to reveal the most
/// information.
///
/// Every round each remaining candidate is scored by the entropy of the
/// feedback it would produce over an evaluation set of possible targets, and
/// the highest scoring candidate is guessed. Ties go to the alphabetically
/// first word.
///
/// The opening round only depends on the vocabulary, so its scores are kept
/// for the next game. With [`cache_file()`](Self::cache_file()) they are
/// also read from, or written once to, a file shared between runs.
///
/// # Examples
///
/// ```rust,no_run
/// use wordle_strategies::Entropy;
///
/// let entropy = Entropy::new()
///     .samples(500)
///     .workers(4)
///     .cache_file("data/entropy_cache.txt")?;
/// #
/// # Ok::<_, wordle_agents::WordleError>(())
/// ```
#[derive(Debug)]
pub struct Entropy {
    dispatcher: EntropyDispatcher,
    cache_file: Option<PathBuf>,
    opening: Option<ScoreTable>,
    rng: StdRng,
}

impl Default for Entropy {
    fn default() -> Self {
        Entropy {
            dispatcher: EntropyDispatcher::new(),
            cache_file: None,
            opening: None,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Entropy {
    /// Creates an `Entropy` strategy that scores candidates in parallel
    /// against every other candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores against at most `n` randomly sampled candidates.
    pub fn samples(self, n: usize) -> Self {
        Entropy {
            dispatcher: self.dispatcher.samples(n),
            ..self
        }
    }

    /// Scores candidates on the calling thread.
    pub fn sequential(self) -> Self {
        Entropy {
            dispatcher: self.dispatcher.sequential(),
            ..self
        }
    }

    /// Scores candidates on a pool of `workers` threads.
    pub fn workers(self, workers: usize) -> Self {
        Entropy {
            dispatcher: self.dispatcher.workers(workers),
            ..self
        }
    }

    /// Seeds the generator used to sample evaluation sets.
    pub fn seed(self, seed: u64) -> Self {
        Entropy {
            rng: StdRng::seed_from_u64(seed),
            ..self
        }
    }

    /// Starts every game from already computed opening scores.
    pub fn opening_scores(self, table: ScoreTable) -> Self {
        Entropy {
            opening: Some(table),
            ..self
        }
    }

    /// Reads opening scores from `path`, or writes them there once they
    /// have been computed if the file does not exist yet.
    ///
    /// A file that appears later, for example one written by another
    /// strategy in the same run, is read before the first guess. Fails if
    /// the file exists but cannot be read or parsed.
    pub fn cache_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let opening = if path.exists() {
            Some(ScoreTable::load(path)?)
        } else {
            debug!("no entropy cache at {} yet", path.display());
            self.opening
        };

        Ok(Entropy {
            cache_file: Some(path.to_path_buf()),
            opening,
            ..self
        })
    }

    /// The opening scores, if they are known yet.
    pub fn opening(&self) -> Option<&ScoreTable> {
        self.opening.as_ref()
    }

    /// The dispatcher computing the scores.
    pub fn dispatcher(&self) -> &EntropyDispatcher {
        &self.dispatcher
    }

    fn best(&mut self, candidates: &[Word]) -> Result<Word> {
        let scores = self.dispatcher.scores(candidates, &mut self.rng)?;
        best_by_key(scores, |&(_, score)| score)
            .map(|(word, _)| word)
            .ok_or_else(|| AgentError::EmptyCandidateSet.into())
    }

    fn opening_guess(&mut self, candidates: &[Word]) -> Result<Word> {
        if self.opening.is_none() {
            if let Some(path) = self.cache_file.as_ref().filter(|path| path.exists()) {
                self.opening = Some(ScoreTable::load(path)?);
            }
        }

        if let Some(table) = &self.opening {
            if let Some((word, score)) = table.best_in(candidates) {
                debug!("opening with {} ({:.4} bits) from stored scores", word, score);
                return Ok(word);
            }
            warn!("stored opening scores share no word with the candidates, recomputing");
        }

        let table = ScoreTable::new(self.dispatcher.scores(candidates, &mut self.rng)?);
        if let Some(path) = self.cache_file.as_ref().filter(|path| !path.exists()) {
            table.save(path)?;
        }
        let (word, _) = table
            .best_in(candidates)
            .ok_or(AgentError::EmptyCandidateSet)?;
        info!("computed {} opening scores, best is {}", table.len(), word);
        self.opening = Some(table);
        Ok(word)
    }
}

impl Strategy for Entropy {
    fn select(&mut self, state: &GameState) -> Result<Word> {
        if state.round() == 0 {
            self.opening_guess(state.candidates())
        } else {
            self.best(state.candidates())
        }
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

impl Display for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordle_strategies::Entropy")?;
        if let Some(n) = self.dispatcher.sample_size() {
            write!(f, " (samples: {})", n)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use wordle_agents::{words::parse_word_list, Agent, Feedback, Harness};

    use super::*;
    use crate::{entropy, Random};

    const VOCABULARY: &str = "crate\ntrace\nslate\nsound\nsassy\nsissy\nessay\nmossy\nbossy\nlossy\nabbey\n\
                              pride\nprize\nbrine\nshine\nwhine\nchime\nflame\nframe\ngrape\n\
                              plumb\nthumb\ncrumb\nnymph\ngodly\nfjord\nquack\nvivid\nwaltz\nglyph\n\
                              knelt\ndwarf\nzesty\nbanjo\njumpy\nhoney\nmoney\nlatch\npatch\nwitch";

    fn vocabulary() -> Vec<Word> {
        parse_word_list(VOCABULARY)
    }

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn guesses_the_most_informative_word() -> Result<()> {
        let words = vocabulary();
        let mut agent = Agent::new(words, Entropy::new().sequential())?;
        let guess = agent.guess()?;

        let candidates = agent.candidates();
        let best = candidates
            .iter()
            .map(|w| entropy(w, candidates))
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((entropy(&guess, candidates) - best).abs() < 1e-12);
        // the first of the best words wins
        let first = candidates
            .iter()
            .find(|w| (entropy(w, candidates) - best).abs() < 1e-12)
            .copied();
        assert_eq!(Some(guess), first);
        Ok(())
    }

    #[test]
    fn guesses_are_always_candidates() -> Result<()> {
        let mut agent = Agent::new(vocabulary(), Entropy::new().workers(2))?;
        let target = word("witch");
        loop {
            let guess = agent.guess()?;
            assert!(agent.candidates().contains(&guess));
            let feedback = Feedback::compute(&guess, &target);
            agent.process_feedback(guess, feedback);
            if feedback.is_solved() {
                break;
            }
        }
        assert!(agent.round() <= 6);
        Ok(())
    }

    #[test]
    fn opening_scores_are_kept_between_games() -> Result<()> {
        let mut agent = Agent::new(vocabulary(), Entropy::new().sequential())?;
        let first = agent.guess()?;
        agent.reset();
        assert_eq!(agent.guess()?, first);
        Ok(())
    }

    #[test]
    fn stored_opening_is_used() -> Result<()> {
        let table = ScoreTable::new([(word("zesty"), 9.0), (word("crate"), 1.0)]);
        let mut agent = Agent::new(vocabulary(), Entropy::new().sequential().opening_scores(table))?;
        assert_eq!(agent.guess()?, word("zesty"));
        Ok(())
    }

    #[test]
    fn stale_opening_is_recomputed() -> Result<()> {
        let table = ScoreTable::new([(word("xylyl"), 9.0)]);
        let fresh = Agent::new(vocabulary(), Entropy::new().sequential())?.guess()?;
        let mut agent = Agent::new(vocabulary(), Entropy::new().sequential().opening_scores(table))?;
        assert_eq!(agent.guess()?, fresh);
        Ok(())
    }

    #[test]
    fn cache_file_is_written_once_and_reused() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("entropy.txt");

        let mut agent = Agent::new(vocabulary(), Entropy::new().sequential().cache_file(&path)?)?;
        let first = agent.guess()?;
        let written = std::fs::read_to_string(&path)?;
        assert_eq!(written.lines().count(), vocabulary().len());
        assert!(written.starts_with(&format!("{}: ", first)));

        // a second game in the same process does not touch the file
        std::fs::write(&path, "crate: 1.0\n")?;
        agent.reset();
        assert_eq!(agent.guess()?, first);
        assert_eq!(std::fs::read_to_string(&path)?, "crate: 1.0\n");

        // a new strategy reads it back
        let mut agent = Agent::new(vocabulary(), Entropy::new().sequential().cache_file(&path)?)?;
        assert_eq!(agent.guess()?, word("crate"));
        Ok(())
    }

    #[test]
    fn malformed_cache_file_is_fatal() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("entropy.txt");
        std::fs::write(&path, "crate: 1.0\nnot a line\n")?;
        assert!(Entropy::new().cache_file(&path).is_err());
        Ok(())
    }

    #[test]
    fn beats_random_guessing() -> Result<()> {
        let words = vocabulary();
        let targets: Vec<Word> = words.iter().copied().take(20).collect();

        let record = Harness::new()
            .quiet()
            .seed(5)
            .targets(targets)
            .test_all()
            .add_agent(Agent::new(words.clone(), Entropy::new().sequential().seed(5))?)
            .add_agent(Agent::new(words, Random::seeded(5))?)
            .run()?;

        let entropy = &record[0];
        let random = &record[1];
        assert_eq!(entropy.num_tried(), 20);
        assert_eq!(entropy.num_solved(), 20);
        assert!(entropy.mean_score() < random.mean_score());
        Ok(())
    }

    #[test]
    fn name_mentions_sampling() {
        assert_eq!(Entropy::new().to_string(), "wordle_strategies::Entropy");
        assert_eq!(
            Entropy::new().samples(100).to_string(),
            "wordle_strategies::Entropy (samples: 100)"
        );
    }
}
