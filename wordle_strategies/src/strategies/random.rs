use std::fmt::Display;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use wordle_agents::{strategy::best_by_key, AgentError, GameState, Narrowing, Result, Strategy, Word};

/// A baseline strategy that guesses a random remaining word.
///
/// `Random` learns nothing from feedback: after each guess only the guessed
/// word is dropped from its candidates.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Default for Random {
    fn default() -> Self {
        Random {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Random {
    /// Creates a `Random` strategy seeded from the operating system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `Random` strategy that makes the same choices every run.
    pub fn seeded(seed: u64) -> Self {
        Random {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for Random {
    fn select(&mut self, state: &GameState) -> Result<Word> {
        state
            .candidates()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| AgentError::EmptyCandidateSet.into())
    }

    fn narrowing(&self) -> Narrowing {
        Narrowing::Remove
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

impl Display for Random {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordle_strategies::Random")
    }
}

/// A baseline strategy that guesses the remaining word with the most
/// distinct letters.
///
/// Like [`Random`] it ignores feedback and only drops guessed words. Ties go
/// to the alphabetically first word, so the strategy is deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DiverseRandom;

impl DiverseRandom {
    /// Creates a `DiverseRandom` strategy.
    pub fn new() -> Self {
        DiverseRandom
    }
}

impl Strategy for DiverseRandom {
    fn select(&mut self, state: &GameState) -> Result<Word> {
        best_by_key(state.candidates().iter().copied(), Word::distinct_letters)
            .ok_or_else(|| AgentError::EmptyCandidateSet.into())
    }

    fn narrowing(&self) -> Narrowing {
        Narrowing::Remove
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

impl Display for DiverseRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordle_strategies::DiverseRandom")
    }
}
