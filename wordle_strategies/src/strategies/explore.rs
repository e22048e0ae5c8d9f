use std::fmt::Display;

use wordle_agents::{GameState, Result, Strategy, Word};

use crate::{Entropy, Frequency};

/// A strategy that explores with [`Entropy`] and then exploits with
/// [`Frequency`].
///
/// Early guesses are chosen for the information they reveal. Once the
/// exploration rounds are over the candidates are usually few, and the
/// cheaper letter frequency score picks among them.
#[derive(Debug)]
pub struct ExploreExploit {
    explore: Entropy,
    exploit: Frequency,
    exploration_rounds: usize,
}

impl ExploreExploit {
    /// Creates an `ExploreExploit` strategy for `vocabulary` that explores
    /// for three rounds.
    pub fn new<'a>(vocabulary: impl IntoIterator<Item = &'a Word>) -> Self {
        ExploreExploit {
            explore: Entropy::new(),
            exploit: Frequency::new(vocabulary),
            exploration_rounds: 3,
        }
    }

    /// Explores for the first `rounds` guesses.
    pub fn exploration_rounds(self, rounds: usize) -> Self {
        ExploreExploit {
            exploration_rounds: rounds,
            ..self
        }
    }

    /// Replaces the entropy strategy used while exploring.
    pub fn explore_with(self, entropy: Entropy) -> Self {
        ExploreExploit {
            explore: entropy,
            ..self
        }
    }

    /// Returns true if the guess for `round` is an exploring one.
    pub fn is_exploring(&self, round: usize) -> bool {
        round < self.exploration_rounds
    }
}

impl Strategy for ExploreExploit {
    fn select(&mut self, state: &GameState) -> Result<Word> {
        if self.is_exploring(state.round()) {
            self.explore.select(state)
        } else {
            self.exploit.select(state)
        }
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

impl Display for ExploreExploit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "wordle_strategies::ExploreExploit (explore: {})",
            self.exploration_rounds
        )
    }
}
