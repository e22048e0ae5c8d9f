//! Tools for defining guessing strategies and the agents that run them.

use std::{
    fmt::{Debug, Display},
    sync::Arc,
};

use itertools::Itertools;
use log::debug;

use crate::{AgentError, Feedback, FeedbackCache, Result, Word};

/// How an agent shrinks its candidate set after feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Narrowing {
    /// Only drop the word that was just guessed.
    Remove,

    /// Keep only the words consistent with the feedback.
    Filter,
}

/// Everything an agent knows about the game in progress.
///
/// Strategies read this in [`Strategy::select()`] but never change it; only
/// the owning [`Agent`] does.
#[derive(Debug, Clone)]
pub struct GameState {
    vocabulary: Arc<[Word]>,
    candidates: Vec<Word>,
    history: Vec<(Word, Feedback)>,
    round: usize,
}

impl GameState {
    fn new(vocabulary: Arc<[Word]>) -> Self {
        GameState {
            candidates: vocabulary.to_vec(),
            vocabulary,
            history: Vec::new(),
            round: 0,
        }
    }

    /// Every word the agent knows, sorted and without duplicates.
    pub fn vocabulary(&self) -> &[Word] {
        &self.vocabulary
    }

    /// The words still consistent with the game so far, sorted.
    pub fn candidates(&self) -> &[Word] {
        &self.candidates
    }

    /// The guesses made this game, in order, with their feedback.
    pub fn history(&self) -> &[(Word, Feedback)] {
        &self.history
    }

    /// The number of guesses processed this game.
    pub fn round(&self) -> usize {
        self.round
    }
}

/// Trait defining a guessing strategy.
///
/// A strategy only decides which word to guess next. The [`Agent`] running
/// it owns the game state and applies feedback, narrowing the candidates the
/// way [`narrowing()`](Strategy::narrowing()) asks.
///
/// # How to implement
///
/// The test harness uses [`Display`] to format the name of the strategy, so
/// do not use linebreaks.
///
/// ```rust
/// use std::fmt::Display;
///
/// use wordle_agents::{AgentError, GameState, Result, Strategy, Word};
///
/// #[derive(Debug)]
/// struct First;
///
/// impl Display for First {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "First")
///     }
/// }
///
/// impl Strategy for First {
///     fn select(&mut self, state: &GameState) -> Result<Word> {
///         state
///             .candidates()
///             .first()
///             .copied()
///             .ok_or_else(|| AgentError::EmptyCandidateSet.into())
///     }
///
///     fn version(&self) -> &'static str {
///         "0.1.0"
///     }
/// }
/// ```
pub trait Strategy: Display + Debug + Send {
    /// Chooses the next guess.
    ///
    /// The agent only calls this while `state` has at least one candidate.
    /// Strategies that probe for information may return words outside the
    /// candidate set, as long as they are in the vocabulary.
    fn select(&mut self, state: &GameState) -> Result<Word>;

    /// Describes how the agent should narrow its candidates after feedback.
    fn narrowing(&self) -> Narrowing {
        Narrowing::Filter
    }

    /// Provides a version for this strategy.
    ///
    /// Change this each time the logic of the strategy changes in order to
    /// produce meaningful comparisons.
    fn version(&self) -> &'static str;
}

/// A strategy together with the state of the game it is playing.
///
/// # Examples
///
/// ```rust
/// # use std::fmt::Display;
/// # use wordle_agents::{AgentError, GameState, Result, Strategy};
/// use wordle_agents::{words::parse_word_list, Agent, Feedback, Word};
/// #
/// # #[derive(Debug)]
/// # struct First;
/// #
/// # impl Display for First {
/// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
/// #         write!(f, "First")
/// #     }
/// # }
/// #
/// # impl Strategy for First {
/// #     fn select(&mut self, state: &GameState) -> Result<Word> {
/// #         state.candidates().first().copied().ok_or_else(|| AgentError::EmptyCandidateSet.into())
/// #     }
/// #
/// #     fn version(&self) -> &'static str {
/// #         "0.1.0"
/// #     }
/// # }
///
/// let vocabulary = parse_word_list("crate\ntrace\nslate\nsound");
/// let mut agent = Agent::new(vocabulary, First)?;
/// let target: Word = "trace".parse()?;
///
/// let guess = agent.guess()?;
/// assert_eq!(&*guess, "crate");
/// agent.process_feedback(guess, Feedback::compute(&guess, &target));
/// assert_eq!(agent.candidates(), &[target]);
/// #
/// # Ok::<_, wordle_agents::WordleError>(())
/// ```
#[derive(Debug)]
pub struct Agent {
    state: GameState,
    strategy: Box<dyn Strategy>,
    cache: FeedbackCache,
}

impl Agent {
    /// Creates an agent playing `strategy` over `vocabulary`.
    ///
    /// The vocabulary is sorted and deduplicated. It must not be empty.
    pub fn new(vocabulary: Vec<Word>, strategy: impl Strategy + 'static) -> Result<Self> {
        Self::boxed(vocabulary, Box::new(strategy))
    }

    /// Creates an agent from an already boxed strategy.
    pub fn boxed(vocabulary: Vec<Word>, strategy: Box<dyn Strategy>) -> Result<Self> {
        let vocabulary: Arc<[Word]> = vocabulary.into_iter().sorted().dedup().collect();
        if vocabulary.is_empty() {
            return Err(AgentError::EmptyVocabulary.into());
        }

        Ok(Agent {
            state: GameState::new(vocabulary),
            strategy,
            cache: FeedbackCache::new(),
        })
    }

    /// Starts a new game.
    pub fn reset(&mut self) {
        self.state = GameState::new(self.state.vocabulary.clone());
        self.cache.clear();
    }

    /// Asks the strategy for the next guess.
    ///
    /// Returns [`AgentError::EmptyCandidateSet`] if no candidates remain, in
    /// which case the caller has to pick a word by other means.
    pub fn guess(&mut self) -> Result<Word> {
        if self.state.candidates.is_empty() {
            return Err(AgentError::EmptyCandidateSet.into());
        }

        let guess = self.strategy.select(&self.state)?;
        debug!(
            "{} round {}: guessing {} with {} candidates",
            self.strategy,
            self.state.round,
            guess,
            self.state.candidates.len()
        );
        Ok(guess)
    }

    /// Records the feedback for `guess` and narrows the candidates.
    pub fn process_feedback(&mut self, guess: Word, feedback: Feedback) {
        self.state.history.push((guess, feedback));
        self.state.round += 1;

        match self.strategy.narrowing() {
            Narrowing::Remove => {
                if let Ok(i) = self.state.candidates.binary_search(&guess) {
                    self.state.candidates.remove(i);
                }
            }
            Narrowing::Filter => {
                let cache = &mut self.cache;
                self.state
                    .candidates
                    .retain(|word| cache.matches(&guess, &feedback, word));
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn vocabulary(&self) -> &[Word] {
        self.state.vocabulary()
    }

    pub fn candidates(&self) -> &[Word] {
        self.state.candidates()
    }

    pub fn history(&self) -> &[(Word, Feedback)] {
        self.state.history()
    }

    pub fn round(&self) -> usize {
        self.state.round()
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    /// The oracle memo of the current game.
    pub fn feedback_cache(&self) -> &FeedbackCache {
        &self.cache
    }
}

/// Returns the first item with the greatest key.
///
/// Later items only win with a strictly greater key, so over sorted input
/// ties go to the smallest item. Keys that do not compare (`NaN`) lose to
/// any key that does.
pub fn best_by_key<T, K, I, F>(items: I, mut key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    let mut best: Option<(T, K)> = None;
    for item in items {
        let k = key(&item);
        let better = match &best {
            None => true,
            Some((_, best_k)) => k > *best_k || best_k.partial_cmp(best_k).is_none(),
        };
        if better {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

#[cfg(test)]
mod test {
    use proptest::prelude::{prop, prop_assert, prop_assert_eq, proptest};

    use super::*;
    use crate::{mock::Mock, words::parse_word_list, WordleError};

    const VOCABULARY: &str = "crate\ntrace\nslate\nsound\nsassy\nsissy\nessay\nmossy\nbossy\nlossy\nabbey";

    fn vocabulary() -> Vec<Word> {
        parse_word_list(VOCABULARY)
    }

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn agent_sorts_and_dedups() -> Result<()> {
        let agent = Agent::new(parse_word_list("trace\ncrate\ntrace"), Mock::new(vec![]))?;
        assert_eq!(agent.vocabulary(), &[word("crate"), word("trace")]);
        assert_eq!(agent.candidates(), agent.vocabulary());
        Ok(())
    }

    #[test]
    fn empty_vocabulary_is_rejected() {
        assert!(matches!(
            Agent::new(Vec::new(), Mock::new(vec![])),
            Err(WordleError::Agent {
                kind: AgentError::EmptyVocabulary
            })
        ));
    }

    #[test]
    fn filtering_keeps_consistent_words() -> Result<()> {
        let mut agent = Agent::new(vocabulary(), Mock::new(vec!["sassy"]))?;
        let guess = agent.guess()?;
        agent.process_feedback(guess, Feedback::compute(&guess, &word("mossy")));

        assert_eq!(agent.round(), 1);
        assert_eq!(agent.history().len(), 1);
        assert_eq!(agent.candidates(), &[word("bossy"), word("lossy"), word("mossy")]);
        for candidate in agent.candidates() {
            for (guess, feedback) in agent.history() {
                assert_eq!(Feedback::compute(guess, candidate), *feedback);
            }
        }
        Ok(())
    }

    #[test]
    fn removal_only_drops_the_guess() -> Result<()> {
        let mut agent = Agent::new(vocabulary(), Mock::new(vec!["sassy"]).removing())?;
        let guess = agent.guess()?;
        agent.process_feedback(guess, Feedback::compute(&guess, &word("mossy")));
        assert_eq!(agent.candidates().len(), vocabulary().len() - 1);
        assert!(!agent.candidates().contains(&guess));
        Ok(())
    }

    #[test]
    fn reset_restores_everything() -> Result<()> {
        let mut agent = Agent::new(vocabulary(), Mock::new(vec!["crate"]))?;
        let guess = agent.guess()?;
        agent.process_feedback(guess, Feedback::compute(&guess, &word("sound")));
        assert!(!agent.feedback_cache().is_empty());

        agent.reset();
        assert_eq!(agent.round(), 0);
        assert!(agent.history().is_empty());
        assert_eq!(agent.candidates(), agent.vocabulary());
        assert!(agent.feedback_cache().is_empty());
        Ok(())
    }

    #[test]
    fn guess_fails_without_candidates() -> Result<()> {
        let mut agent = Agent::new(parse_word_list("crate\ntrace"), Mock::new(vec!["crate"]))?;
        let guess = agent.guess()?;
        // no word in the vocabulary is consistent with this
        agent.process_feedback(guess, "bbbbb".parse()?);
        assert!(agent.candidates().is_empty());
        assert!(agent.guess().unwrap_err().is_empty_candidate_set());
        Ok(())
    }

    #[test]
    fn best_by_key_prefers_first() {
        let items = ["b", "a", "c", "d"];
        let lens = [1, 2, 2, 1];
        let best = best_by_key(items.iter().zip(lens), |&(_, len)| len);
        assert_eq!(best.map(|(s, _)| *s), Some("a"));
        assert_eq!(best_by_key(Vec::<u8>::new(), |&x| x), None);
        assert_eq!(best_by_key([f64::NAN, 1.0, 0.5], |&x| x), Some(1.0));
    }

    fn any_vocab_word() -> impl prop::strategy::Strategy<Value = Word> {
        prop::sample::select(vocabulary())
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(guess in any_vocab_word(), target in any_vocab_word()) {
            let feedback = Feedback::compute(&guess, &target);
            let once: Vec<Word> = vocabulary()
                .into_iter()
                .filter(|w| crate::feedback::matches(&guess, &feedback, w))
                .collect();
            let twice: Vec<Word> = once
                .iter()
                .copied()
                .filter(|w| crate::feedback::matches(&guess, &feedback, w))
                .collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn candidates_never_grow(target in any_vocab_word(), guesses in prop::collection::vec(any_vocab_word(), 1..6)) {
            let mut agent = Agent::new(vocabulary(), Mock::new(vec![])).unwrap();
            let mut previous = agent.candidates().len();
            for guess in guesses {
                agent.process_feedback(guess, Feedback::compute(&guess, &target));
                prop_assert!(agent.candidates().len() <= previous);
                prop_assert!(agent.candidates().contains(&target));
                previous = agent.candidates().len();
            }
        }
    }
}
