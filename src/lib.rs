#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use thiserror::Error;

pub mod word;
pub use word::{Word, WORD_LEN};

pub mod words;

pub mod feedback;
pub use feedback::{Feedback, FeedbackCache, Grade};

pub mod puzzle;
pub use puzzle::{Attempts, Puzzle, MAX_ATTEMPTS};

pub mod strategy;
pub use strategy::{Agent, GameState, Narrowing, Strategy};

pub mod env;
pub use env::WordleEnv;

pub mod harness;
pub use harness::{Harness, Record};

pub mod perf;
pub use perf::{Perf, Summary};

#[cfg(feature = "stats")]
mod stats;

#[cfg(test)]
mod mock;

/// A specialized [`Result`](std::result::Result) for this crate.
pub type Result<T, E = WordleError> = std::result::Result<T, E>;

/// The errors that `wordle_agents` can produce.
#[derive(Debug, Error)]
pub enum WordleError {
    #[error("puzzle encountered error")]
    Puzzle {
        #[from]
        kind: PuzzleError,
    },

    #[error("agent could not choose a guess")]
    Agent {
        #[from]
        kind: AgentError,
    },

    #[error("entropy cache could not be used")]
    Cache {
        #[from]
        kind: CacheError,
    },

    #[error("the test harness encountered an error")]
    Harness {
        #[from]
        kind: HarnessError,
    },

    #[error("general IO error")]
    Io(#[from] std::io::Error),

    #[error("cannot compare a strategy with itself")]
    SelfComparison,

    #[error("cannot run statistics on these samples")]
    Stats,

    #[cfg(feature = "serde")]
    #[error("trouble serializing or deserializing results")]
    Serde(#[from] serde_json::Error),
}

impl WordleError {
    /// Returns true if this error means the agent ran out of candidates.
    ///
    /// This is the one failure the evaluation harness recovers from.
    pub fn is_empty_candidate_set(&self) -> bool {
        matches!(
            self,
            WordleError::Agent {
                kind: AgentError::EmptyCandidateSet
            }
        )
    }
}

#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The string provided is not five lowercase ascii letters.
    #[error("\"{0}\" is not a five letter lowercase word")]
    InvalidWord(String),

    /// The string provided is not five characters of `g`, `y` and `b`.
    #[error("\"{0}\" is not a valid feedback code")]
    InvalidFeedback(String),

    /// The puzzle has already evaluated six guesses.
    #[error("the puzzle has already evaluated six guesses")]
    OutOfGuesses,

    /// The environment was asked to play an action outside its word list.
    #[error("the action {0} does not correspond to a word in the word list")]
    InvalidAction(usize),
}

#[derive(Debug, Error)]
pub enum AgentError {
    /// No word in the candidate set is consistent with the feedback so far.
    #[error("no candidates remain")]
    EmptyCandidateSet,

    /// An agent cannot be built without any words.
    #[error("the vocabulary is empty")]
    EmptyVocabulary,

    /// A parallel entropy computation failed.
    #[error("entropy worker failed: {0}")]
    WorkerFailure(String),
}

#[derive(Debug, Error)]
pub enum CacheError {
    /// A line of the cache file is not of the form `word: score`.
    #[error("line {line} of the entropy cache is malformed: \"{content}\"")]
    MalformedEntry { line: usize, content: String },

    #[error("could not read or write the entropy cache file")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("no strategies have been added to the harness")]
    NoStrategiesAdded,

    #[error("the harness has no target words to test against")]
    NoTargets,

    #[error("cannot fall back to a random guess from an empty vocabulary")]
    EmptyVocabulary,
}
