//! Expected information of guesses, computed sequentially or on a thread
//! pool.
//!
//! The entropy of a guess is measured over an evaluation set of possible
//! targets: every target is sorted into one of the 243 feedback buckets and
//! the entropy of the resulting distribution is the number of bits the guess
//! is expected to reveal.

use std::{
    any::Any,
    num::NonZeroUsize,
    panic::{self, AssertUnwindSafe},
};

use log::{debug, trace};
use rand::{seq::index, Rng};
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use wordle_agents::{feedback::NUM_FEEDBACKS, AgentError, Feedback, Result, Word};

/// The entropy in bits of the feedback distribution of `guess` over
/// `targets`.
///
/// The result is never negative, and is zero exactly when every target
/// produces the same feedback. An empty target set has zero entropy.
///
/// # Examples
///
/// ```rust
/// use wordle_agents::Word;
/// use wordle_strategies::entropy;
///
/// let guess: Word = "crate".parse()?;
/// let targets = ["trace".parse()?, "sound".parse()?];
/// assert!((entropy(&guess, &targets) - 1.0).abs() < 1e-12);
/// assert_eq!(entropy(&guess, &targets[..1]), 0.0);
/// #
/// # Ok::<_, wordle_agents::WordleError>(())
/// ```
pub fn entropy(guess: &Word, targets: &[Word]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }

    let mut buckets = [0_u32; NUM_FEEDBACKS];
    for target in targets {
        buckets[Feedback::compute(guess, target).index()] += 1;
    }

    // summed in sorted order so equal distributions score exactly equal
    let mut counts: Vec<u32> = buckets.into_iter().filter(|&n| n > 0).collect();
    counts.sort_unstable();

    let total = targets.len() as f64;
    let sum: f64 = counts
        .into_iter()
        .map(|n| {
            let p = n as f64 / total;
            p * p.log2()
        })
        .sum();

    // a single bucket gives -0.0
    if sum == 0.0 {
        0.0
    } else {
        -sum
    }
}

/// The fixed set of targets one round of scoring is measured against.
///
/// Workers only ever read the context, so it is shared between them without
/// copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntropyContext {
    targets: Vec<Word>,
}

impl EntropyContext {
    /// Creates a context over `targets`.
    pub fn new(targets: Vec<Word>) -> Self {
        EntropyContext { targets }
    }

    /// The targets guesses are scored against.
    pub fn targets(&self) -> &[Word] {
        &self.targets
    }

    /// The entropy of `guess` over this context's targets.
    pub fn entropy(&self, guess: &Word) -> f64 {
        entropy(guess, &self.targets)
    }
}

/// How the dispatcher runs a batch of entropy computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Score every candidate on the calling thread.
    Sequential,

    /// Score candidates on a dedicated pool with this many threads.
    Parallel {
        /// The number of worker threads, at least one.
        workers: usize,
    },
}

impl Default for Execution {
    fn default() -> Self {
        Execution::Parallel {
            workers: default_workers(),
        }
    }
}

/// Half the available cores, and at least one.
pub fn default_workers() -> usize {
    (std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        / 2)
        .max(1)
}

/// Scores candidate guesses by entropy.
///
/// By default every candidate is scored against every candidate on a pool
/// using half the available cores. The pool is built the first time it is
/// needed and reused afterwards. With [`samples()`](Self::samples()) the
/// evaluation set is a random sample of the candidates instead, which trades
/// accuracy for speed on large candidate sets.
///
/// Both execution modes produce the same scores in the same order.
#[derive(Debug, Default)]
pub struct EntropyDispatcher {
    samples: Option<usize>,
    execution: Execution,
    pool: Option<ThreadPool>,
}

impl EntropyDispatcher {
    /// Creates a parallel dispatcher that evaluates against every candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates against at most `n` randomly sampled candidates.
    pub fn samples(self, n: usize) -> Self {
        EntropyDispatcher {
            samples: Some(n),
            ..self
        }
    }

    /// Evaluates against every candidate.
    pub fn all_targets(self) -> Self {
        EntropyDispatcher {
            samples: None,
            ..self
        }
    }

    /// Scores candidates on the calling thread.
    pub fn sequential(self) -> Self {
        EntropyDispatcher {
            execution: Execution::Sequential,
            pool: None,
            ..self
        }
    }

    /// Scores candidates on a pool of `workers` threads.
    pub fn workers(self, workers: usize) -> Self {
        EntropyDispatcher {
            execution: Execution::Parallel {
                workers: workers.max(1),
            },
            pool: None,
            ..self
        }
    }

    /// The configured execution mode.
    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// The configured sample size, if any.
    pub fn sample_size(&self) -> Option<usize> {
        self.samples
    }

    /// Picks the targets candidates are scored against this round.
    ///
    /// Without sampling, or when there are no more candidates than samples,
    /// this is every candidate. The result keeps the order of `candidates`.
    pub fn evaluation_set<R: Rng + ?Sized>(&self, candidates: &[Word], rng: &mut R) -> EntropyContext {
        match self.samples {
            Some(n) if n < candidates.len() => {
                let mut picked = index::sample(rng, candidates.len(), n).into_vec();
                picked.sort_unstable();
                EntropyContext::new(picked.into_iter().map(|i| candidates[i]).collect())
            }
            _ => EntropyContext::new(candidates.to_vec()),
        }
    }

    /// Scores every candidate against a freshly chosen evaluation set.
    ///
    /// The scores come back in the order of `candidates`.
    pub fn scores<R: Rng + ?Sized>(&mut self, candidates: &[Word], rng: &mut R) -> Result<Vec<(Word, f64)>> {
        let context = self.evaluation_set(candidates, rng);
        self.scores_against(candidates, &context)
    }

    /// Scores every candidate against `context`.
    ///
    /// The scores come back in the order of `candidates`. A worker that
    /// panics, or a pool that cannot be started, is reported as
    /// [`AgentError::WorkerFailure`].
    pub fn scores_against(&mut self, candidates: &[Word], context: &EntropyContext) -> Result<Vec<(Word, f64)>> {
        trace!(
            "scoring {} candidates against {} targets",
            candidates.len(),
            context.targets().len()
        );

        self.score_with(candidates, |guess| context.entropy(guess))
    }

    fn score_with<F>(&mut self, candidates: &[Word], score: F) -> Result<Vec<(Word, f64)>>
    where
        F: Fn(&Word) -> f64 + Sync,
    {
        match self.execution {
            Execution::Sequential => Ok(candidates
                .iter()
                .map(|guess| (*guess, score(guess)))
                .collect()),
            Execution::Parallel { workers } => {
                let pool = self.pool(workers)?;
                panic::catch_unwind(AssertUnwindSafe(|| {
                    pool.install(|| {
                        candidates
                            .par_iter()
                            .map(|guess| (*guess, score(guess)))
                            .collect()
                    })
                }))
                .map_err(|payload| AgentError::WorkerFailure(panic_message(payload)).into())
            }
        }
    }

    fn pool(&mut self, workers: usize) -> Result<&ThreadPool> {
        let pool = match self.pool.take() {
            Some(pool) => pool,
            None => {
                debug!("starting entropy pool with {} workers", workers);
                ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("entropy-{}", i))
                    .build()
                    .map_err(|e| AgentError::WorkerFailure(e.to_string()))?
            }
        };
        Ok(self.pool.insert(pool))
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
