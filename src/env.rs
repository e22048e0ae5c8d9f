//! A reinforcement learning style environment around a single puzzle.
//!
//! Actions are indices into the environment's word list. Each step returns
//! the feedback as a `5 x 3` one-hot matrix (column 0 black, 1 yellow,
//! 2 green), a reward of 1.0 for a correct guess and the usual termination
//! flags.

use std::fmt::Display;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{AgentError, Feedback, PuzzleError, Result, Word, MAX_ATTEMPTS, WORD_LEN};

/// The feedback of one step, one row per letter.
pub type Observation = [[u8; 3]; WORD_LEN];

/// Encodes feedback as one-hot rows.
pub fn observe(feedback: &Feedback) -> Observation {
    let mut observation = [[0; 3]; WORD_LEN];
    for (row, grade) in observation.iter_mut().zip(feedback.grades()) {
        row[grade.class()] = 1;
    }
    observation
}

/// The result of [`WordleEnv::step()`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    /// The episode ended, either solved or out of attempts.
    pub terminated: bool,
    /// The episode ran out of attempts.
    pub truncated: bool,
}

/// A Wordle game that can be reset and stepped.
///
/// # Examples
///
/// ```rust
/// use wordle_agents::{words::parse_word_list, WordleEnv};
///
/// let mut env = WordleEnv::new(parse_word_list("crate\ntrace"))?;
/// env.reset_to("trace".parse()?);
///
/// let step = env.step(0)?;
/// assert_eq!(step.reward, 0.0);
/// assert_eq!(
///     step.observation,
///     [[0, 1, 0], [0, 0, 1], [0, 0, 1], [0, 1, 0], [0, 0, 1]]
/// );
///
/// let step = env.step(1)?;
/// assert_eq!(step.reward, 1.0);
/// assert!(step.terminated);
/// #
/// # Ok::<_, wordle_agents::WordleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WordleEnv {
    word_list: Vec<Word>,
    target: Word,
    attempts: usize,
    done: bool,
    rng: StdRng,
}

impl WordleEnv {
    /// Creates an environment over `word_list` with a random target.
    pub fn new(word_list: Vec<Word>) -> Result<Self> {
        let mut rng = StdRng::from_entropy();
        let target = *word_list
            .choose(&mut rng)
            .ok_or(AgentError::EmptyVocabulary)?;
        Ok(WordleEnv {
            word_list,
            target,
            attempts: 0,
            done: false,
            rng,
        })
    }

    /// Starts a new episode with a random target and returns the empty
    /// observation.
    ///
    /// Passing a seed makes the choice of target reproducible.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        if let Some(&target) = self.word_list.choose(&mut self.rng) {
            self.target = target;
        }
        self.attempts = 0;
        self.done = false;
        [[0; 3]; WORD_LEN]
    }

    /// Starts a new episode with a known target.
    pub fn reset_to(&mut self, target: Word) -> Observation {
        self.target = target;
        self.attempts = 0;
        self.done = false;
        [[0; 3]; WORD_LEN]
    }

    /// Guesses the word at index `action`.
    pub fn step(&mut self, action: usize) -> Result<Step> {
        let guess = *self
            .word_list
            .get(action)
            .ok_or(PuzzleError::InvalidAction(action))?;
        if self.done {
            return Err(PuzzleError::OutOfGuesses.into());
        }

        self.attempts += 1;
        let solved = guess == self.target;
        let truncated = self.attempts >= MAX_ATTEMPTS;
        let terminated = solved || truncated;
        self.done = terminated;

        Ok(Step {
            observation: observe(&Feedback::compute(&guess, &self.target)),
            reward: if solved { 1.0 } else { 0.0 },
            terminated,
            truncated,
        })
    }

    /// The index of `word` in the word list, usable as an action.
    pub fn action_of(&self, word: &Word) -> Option<usize> {
        self.word_list.iter().position(|w| w == word)
    }

    pub fn word_list(&self) -> &[Word] {
        &self.word_list
    }

    pub fn target(&self) -> Word {
        self.target
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Describes the current episode.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for WordleEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Target: {} | Attempts: {}", self.target, self.attempts)
    }
}
