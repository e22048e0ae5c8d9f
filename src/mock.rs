use std::fmt::Display;

use crate::{AgentError, GameState, Narrowing, Result, Strategy, Word};

/// Plays a fixed list of guesses, then the first candidate.
#[derive(Debug, Clone)]
pub(crate) struct Mock {
    guesses: Vec<&'static str>,
    narrowing: Narrowing,
}

impl Mock {
    pub(crate) fn new(guesses: Vec<&'static str>) -> Self {
        Self {
            guesses,
            narrowing: Narrowing::Filter,
        }
    }

    pub(crate) fn removing(self) -> Self {
        Self {
            narrowing: Narrowing::Remove,
            ..self
        }
    }
}

impl Strategy for Mock {
    fn select(&mut self, state: &GameState) -> Result<Word> {
        match self.guesses.get(state.round()) {
            Some(guess) => guess.parse(),
            None => state
                .candidates()
                .first()
                .copied()
                .ok_or_else(|| AgentError::EmptyCandidateSet.into()),
        }
    }

    fn narrowing(&self) -> Narrowing {
        self.narrowing
    }

    fn version(&self) -> &'static str {
        "1.2.4"
    }
}

impl Display for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mock {:?}", self.guesses)
    }
}
