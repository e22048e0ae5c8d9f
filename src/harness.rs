//! The test harness for running agents against many puzzles.

use std::{ops::Deref, time::Instant};

use comfy_table::{presets::UTF8_FULL, Cell, Table};
#[cfg(feature = "stats")]
use comfy_table::Color;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rand::{rngs::StdRng, seq::index::sample, seq::SliceRandom, SeedableRng};

use crate::{
    perf::{Perf, Summary},
    Agent, Attempts, HarnessError, Puzzle, Result, Word,
};

/// A test harness that can run many agents on many puzzles.
///
/// When you want to test your agents, create a new test harness
/// with [`new()`](Harness::new()). You can then configure it using various
/// methods. Note that these configuration methods consume the existing
/// [`Harness`] and return a new one.
///
/// Agents play one game at a time. Every agent plays the same targets, in
/// the same order, and is reset before each game.
///
/// # Examples
///
/// ```rust
/// # use std::fmt::Display;
/// # use wordle_agents::{AgentError, GameState, Result, Strategy, Word};
/// use wordle_agents::{words::parse_word_list, Agent, Harness};
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
/// let words = parse_word_list("crate\ntrace\nslate\nsound");
/// let mut harness = Harness::new()
///     .quiet()
///     .add_agent(Agent::new(words.clone(), First)?)
///     .targets(words)
///     .test_all();
///
/// let record = harness.run()?;
/// assert_eq!(record[0].num_solved(), 4);
/// #
/// # Ok::<_, wordle_agents::WordleError>(())
/// ```
#[derive(Debug)]
pub struct Harness {
    agents: Vec<Agent>,
    targets: Vec<Word>,
    verbose: bool,
    num_targets: Option<usize>,
    baseline: Option<usize>,
    rng: StdRng,
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            agents: Vec::new(),
            targets: Vec::new(),
            verbose: false,
            num_targets: Some(100),
            baseline: None,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Harness {
    /// Creates a new test harness with default configuration.
    ///
    /// Defaults:
    /// 1. tests no agents
    /// 2. quiet mode
    /// 3. runs each agent on 100 targets chosen at random
    /// 4. does not compare against a baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the harness verbose while testing.
    ///
    /// As of right now, this consists of a progress bar and nothing else.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    /// Makes the harness silent while testing.
    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    /// Adds an agent to the harness for testing.
    pub fn add_agent(self, agent: Agent) -> Self {
        let mut agents = self.agents;
        agents.push(agent);
        Harness { agents, ..self }
    }

    /// Adds a [`Vec`] of agents to the harness for testing.
    pub fn add_agents(self, new: Vec<Agent>) -> Self {
        let mut agents = self.agents;
        agents.extend(new);
        Harness { agents, ..self }
    }

    /// Adds an agent to the harness for testing and sets it as the baseline
    /// for comparison.
    pub fn add_baseline(self, agent: Agent) -> Self {
        self.add_agent(agent).and_baseline()
    }

    /// Sets the most recently added agent as the baseline for comparisons.
    pub fn and_baseline(self) -> Self {
        Self {
            baseline: self.agents.len().checked_sub(1),
            ..self
        }
    }

    /// Sets the words the agents will have to find.
    pub fn targets(self, targets: Vec<Word>) -> Self {
        Harness { targets, ..self }
    }

    /// Sets the harness to test each agent on every target.
    pub fn test_all(self) -> Self {
        Harness {
            num_targets: None,
            ..self
        }
    }

    /// Sets the harness to test each agent on `n` random targets.
    pub fn test_num(self, n: usize) -> Self {
        Harness {
            num_targets: Some(n),
            ..self
        }
    }

    /// Seeds the choice of targets and of fallback guesses.
    pub fn seed(self, seed: u64) -> Self {
        Harness {
            rng: StdRng::seed_from_u64(seed),
            ..self
        }
    }

    /// Runs the harness and produces performances for each agent.
    ///
    /// The [`Perf`]s will be in the same order as the agents were added
    /// to the harness.
    pub fn run(&mut self) -> Result<Record> {
        if self.agents.is_empty() {
            return Err(HarnessError::NoStrategiesAdded.into());
        }
        if self.targets.is_empty() {
            return Err(HarnessError::NoTargets.into());
        }

        let targets: Vec<Word> = match self.num_targets {
            Some(n) => {
                let n = n.min(self.targets.len());
                sample(&mut self.rng, self.targets.len(), n)
                    .iter()
                    .map(|i| self.targets[i])
                    .collect()
            }
            None => self.targets.clone(),
        };

        let mut perfs = Vec::with_capacity(self.agents.len());
        for agent in self.agents.iter_mut() {
            let mut perf = Perf::new(agent.strategy());
            info!(
                "playing {} games with {}",
                targets.len(),
                perf.strategy_name()
            );

            let progress = if self.verbose {
                let bar = ProgressBar::new(targets.len() as u64);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{msg:30} [{bar:40}] {pos}/{len} ({eta})")
                        .progress_chars("=> "),
                );
                bar.set_message(perf.strategy_name().to_string());
                bar
            } else {
                ProgressBar::hidden()
            };

            for &target in &targets {
                let start = Instant::now();
                let attempts = play(agent, target, &mut self.rng)?;
                perf.tries.push((target, attempts, start.elapsed()));
                progress.inc(1);
            }
            progress.finish_and_clear();

            perfs.push(perf);
        }

        Ok(Record::new(perfs, self.baseline))
    }

    /// Runs the harness (see [`run()`](Harness::run())) and prints
    /// performance summaries of each agent.
    pub fn run_and_summarize(&mut self) -> Result<Record> {
        let perfs = self.run()?;
        for perf in perfs.iter() {
            println!("{}", perf);
        }
        Ok(perfs)
    }
}

/// Plays one game of `agent` against `target`.
///
/// The agent is reset first. If it runs out of candidates, a random word from
/// its vocabulary is guessed in its place.
pub fn play(agent: &mut Agent, target: Word, rng: &mut StdRng) -> Result<Attempts> {
    let puzzle = Puzzle::new(target);
    let mut attempts = Attempts::new();
    agent.reset();

    while !attempts.finished() {
        let guess = match agent.guess() {
            Ok(guess) => guess,
            Err(e) if e.is_empty_candidate_set() => {
                warn!(
                    "{} has no candidates left for {}, guessing at random",
                    agent.strategy(),
                    target
                );
                *agent
                    .vocabulary()
                    .choose(rng)
                    .ok_or(HarnessError::EmptyVocabulary)?
            }
            Err(e) => return Err(e),
        };

        let feedback = puzzle.check(&guess, &mut attempts)?;
        agent.process_feedback(guess, feedback);
    }

    Ok(attempts)
}

/// The performances of every agent from one harness run.
#[derive(Debug, Clone, Default)]
pub struct Record {
    perfs: Vec<Perf>,
    baseline: Option<usize>,
}

impl Deref for Record {
    type Target = [Perf];

    fn deref(&self) -> &Self::Target {
        &self.perfs
    }
}

impl Record {
    fn new(perfs: Vec<Perf>, baseline: impl Into<Option<usize>>) -> Self {
        Self {
            perfs,
            baseline: baseline.into(),
        }
    }

    /// The performance that the others are compared against, if any.
    pub fn baseline(&self) -> Option<&Perf> {
        self.baseline.and_then(|n| self.perfs.get(n))
    }

    /// Summarizes every performance.
    pub fn summaries(&self) -> Vec<Summary<'_>> {
        self.perfs.iter().map(Perf::to_summary).collect()
    }

    /// Builds a table with one row per agent.
    pub fn report_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);

        let mut header = vec![
            "Strategy",
            "Games",
            "Solved",
            "Mean attempts",
            "Mean solved",
            "Time / game",
        ];
        #[cfg(feature = "stats")]
        if self.baseline.is_some() {
            header.extend(["vs. baseline", "p (attempts)", "p (solved)"]);
        }
        table.set_header(header);

        #[cfg(feature = "stats")]
        let baseline = self.baseline().map(Perf::to_summary);

        for summary in self.summaries() {
            #[allow(unused_mut)]
            let mut row = vec![
                Cell::new(summary.strategy_name()),
                Cell::new(summary.num_tried()),
                Cell::new(format!("{:.1}%", summary.frac_solved() * 100.)),
                Cell::new(format!("{:.2}", summary.mean_score())),
                Cell::new(format!("{:.2}", summary.mean_guesses())),
                Cell::new(format!("{:.4}s", summary.mean_time().as_secs_f64())),
            ];

            #[cfg(feature = "stats")]
            if let Some(baseline) = &baseline {
                match summary.compare(baseline) {
                    Ok(comparison) => {
                        let diff = comparison.mean_score_diff();
                        let mut cell = Cell::new(format!("{:+.2}", diff));
                        if comparison.score_significant() {
                            cell = cell.fg(if diff < 0. { Color::Green } else { Color::Red });
                        }
                        row.push(cell);
                        row.push(Cell::new(format!("{:.4}", comparison.score_p())));
                        row.push(Cell::new(format!("{:.4}", comparison.solved_p())));
                    }
                    Err(_) => row.extend(["-", "-", "-"].map(Cell::new)),
                }
            }

            table.add_row(row);
        }

        table
    }

    /// Prints the report table and a histogram for each agent.
    pub fn print_report(&self) -> Result<()> {
        println!("{}", self.report_table());
        for summary in self.summaries() {
            summary.print(Summary::print_options().histogram(true))?;
        }
        Ok(())
    }

    /// Writes the summaries to `path` as JSON.
    #[cfg(feature = "serde")]
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &self.summaries())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{mock::Mock, words::parse_word_list, WordleError};

    fn words() -> Vec<Word> {
        parse_word_list("crate\ntrace\nslate\nsound\nsassy\nsissy\nmossy\nbossy\nlossy\nabbey")
    }

    #[test]
    fn needs_agents_and_targets() {
        let mut harness = Harness::new().targets(words());
        assert!(matches!(
            harness.run(),
            Err(WordleError::Harness {
                kind: HarnessError::NoStrategiesAdded
            })
        ));

        let mut harness = Harness::new().add_agent(Agent::new(words(), Mock::new(vec![])).unwrap());
        assert!(matches!(
            harness.run(),
            Err(WordleError::Harness {
                kind: HarnessError::NoTargets
            })
        ));
    }

    #[test]
    fn every_agent_plays_every_target() -> Result<()> {
        let mut harness = Harness::new()
            .seed(1)
            .add_agent(Agent::new(words(), Mock::new(vec![]))?)
            .add_baseline(Agent::new(words(), Mock::new(vec!["sassy"]))?)
            .targets(words())
            .test_num(5);
        let record = harness.run()?;

        assert_eq!(record.len(), 2);
        assert!(record.baseline().is_some());
        for perf in record.iter() {
            assert_eq!(perf.num_tried(), 5);
        }
        let first: Vec<Word> = record[0].tries().iter().map(|t| t.0).collect();
        let second: Vec<Word> = record[1].tries().iter().map(|t| t.0).collect();
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_num_is_clamped() -> Result<()> {
        let mut harness = Harness::new()
            .add_agent(Agent::new(words(), Mock::new(vec![]))?)
            .targets(words())
            .test_num(1000);
        let record = harness.run()?;
        assert_eq!(record[0].num_tried() as usize, words().len());
        Ok(())
    }

    #[test]
    fn falls_back_when_candidates_run_out() -> Result<()> {
        // `zzzzz` is not in the vocabulary, so filtering leaves nothing
        let mut agent = Agent::new(words(), Mock::new(vec![]))?;
        let mut rng = StdRng::seed_from_u64(3);
        let attempts = play(&mut agent, "zzzzz".parse()?, &mut rng)?;
        assert_eq!(attempts.len(), crate::MAX_ATTEMPTS);
        assert!(!attempts.solved());
        assert_eq!(attempts.score(), crate::MAX_ATTEMPTS + 1);
        Ok(())
    }

    #[test]
    fn stops_when_solved() -> Result<()> {
        let mut agent = Agent::new(words(), Mock::new(vec!["sassy"]))?;
        let mut rng = StdRng::seed_from_u64(3);
        let attempts = play(&mut agent, "sassy".parse()?, &mut rng)?;
        assert_eq!(attempts.len(), 1);
        assert!(attempts.solved());
        Ok(())
    }

    #[test]
    fn report_has_a_row_per_agent() -> Result<()> {
        let mut harness = Harness::new()
            .seed(9)
            .add_agent(Agent::new(words(), Mock::new(vec![]))?)
            .add_agent(Agent::new(words(), Mock::new(vec!["abbey"]))?)
            .and_baseline()
            .targets(words())
            .test_all();
        let record = harness.run()?;
        let table = record.report_table().to_string();
        assert!(table.contains("Mock"));
        assert_eq!(record.summaries().len(), 2);
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn saves_json() -> Result<()> {
        let mut harness = Harness::new()
            .add_agent(Agent::new(words(), Mock::new(vec![]))?)
            .targets(words())
            .test_all();
        let record = harness.run()?;
        let file = tempfile::NamedTempFile::new()?;
        record.save_json(file.path())?;
        let json: serde_json::Value = serde_json::from_reader(std::fs::File::open(file.path())?)?;
        assert_eq!(json[0]["num_tried"], 10);
        Ok(())
    }
}
