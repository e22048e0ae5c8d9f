use std::{fmt::Display, path::PathBuf};

use anyhow::{bail, Context};
use clap::ValueEnum;
use log::{debug, info};
use wordle_agents::{words::load_word_list, Agent, Harness, Word};
use wordle_strategies::{DiverseRandom, Entropy, ExploreExploit, Frequency, Random};

/// The strategies the runner knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    Random,
    Diverse,
    Frequency,
    Entropy,
    Explore,
}

impl Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgentKind::Random => "random",
            AgentKind::Diverse => "diverse",
            AgentKind::Frequency => "frequency",
            AgentKind::Entropy => "entropy",
            AgentKind::Explore => "explore",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct RunOptions {
    /// Word list the agents guess from.
    #[arg(long)]
    pub words: PathBuf,

    /// Word list the targets are drawn from. Defaults to the guess list.
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Number of random targets each agent plays [default: 100].
    #[arg(long, conflicts_with = "all")]
    pub games: Option<usize>,

    /// Play every target once.
    #[arg(long)]
    pub all: bool,

    /// Agents to benchmark, separated by commas.
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [AgentKind::Random, AgentKind::Frequency, AgentKind::Entropy]
    )]
    pub agents: Vec<AgentKind>,

    /// File holding the opening entropy scores, written on first use.
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Score entropy against this many sampled candidates.
    #[arg(long)]
    pub samples: Option<usize>,

    /// Score entropy on a single thread.
    #[arg(long, conflicts_with = "workers")]
    pub sequential: bool,

    /// Threads used to score entropy [default: half the cores].
    #[arg(long)]
    pub workers: Option<usize>,

    /// Rounds the explore agent spends on entropy before switching.
    #[arg(long, default_value_t = 3)]
    pub exploration_rounds: usize,

    /// Seed for targets, random agents and sampling.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Agent the others are compared against.
    #[arg(long, value_enum)]
    pub baseline: Option<AgentKind>,

    /// Also write the summaries to this JSON file.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Show progress bars.
    #[arg(long)]
    pub verbose: bool,
}

impl RunOptions {
    fn entropy(&self) -> anyhow::Result<Entropy> {
        let mut entropy = Entropy::new();
        if let Some(n) = self.samples {
            entropy = entropy.samples(n);
        }
        if self.sequential {
            entropy = entropy.sequential();
        } else if let Some(workers) = self.workers {
            entropy = entropy.workers(workers);
        }
        if let Some(seed) = self.seed {
            entropy = entropy.seed(seed);
        }
        if let Some(path) = &self.cache {
            entropy = entropy
                .cache_file(path)
                .with_context(|| format!("could not use entropy cache {}", path.display()))?;
        }
        Ok(entropy)
    }

    /// Builds an agent playing `kind` over `vocabulary`.
    pub fn agent(&self, kind: AgentKind, vocabulary: &[Word]) -> anyhow::Result<Agent> {
        let agent = match kind {
            AgentKind::Random => {
                let random = match self.seed {
                    Some(seed) => Random::seeded(seed),
                    None => Random::new(),
                };
                Agent::new(vocabulary.to_vec(), random)
            }
            AgentKind::Diverse => Agent::new(vocabulary.to_vec(), DiverseRandom::new()),
            AgentKind::Frequency => Agent::new(vocabulary.to_vec(), Frequency::new(vocabulary)),
            AgentKind::Entropy => Agent::new(vocabulary.to_vec(), self.entropy()?),
            AgentKind::Explore => Agent::new(
                vocabulary.to_vec(),
                ExploreExploit::new(vocabulary)
                    .exploration_rounds(self.exploration_rounds)
                    .explore_with(self.entropy()?),
            ),
        };
        Ok(agent?)
    }

    /// The agents to run in order, with the baseline appended if it was
    /// not asked for otherwise.
    pub fn kinds(&self) -> Vec<AgentKind> {
        let mut kinds = Vec::new();
        for &kind in self.agents.iter().chain(self.baseline.iter()) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }
}

/// Loads the word lists, plays every agent and prints the report.
pub fn run(options: RunOptions) -> anyhow::Result<()> {
    let mut vocabulary = load_word_list(&options.words)
        .with_context(|| format!("could not read word list {}", options.words.display()))?;
    let targets = match &options.answers {
        Some(path) => load_word_list(path)
            .with_context(|| format!("could not read answer list {}", path.display()))?,
        None => vocabulary.clone(),
    };
    if vocabulary.is_empty() {
        bail!("{} holds no five letter words", options.words.display());
    }

    // targets the agents cannot guess would never be solved
    vocabulary.extend(targets.iter().copied());
    vocabulary.sort_unstable();
    vocabulary.dedup();
    info!(
        "{} words in the vocabulary, {} possible targets",
        vocabulary.len(),
        targets.len()
    );

    let mut harness = Harness::new().targets(targets);
    harness = if options.verbose {
        harness.verbose()
    } else {
        harness.quiet()
    };
    harness = match options.games {
        _ if options.all => harness.test_all(),
        Some(n) => harness.test_num(n),
        None => harness,
    };
    if let Some(seed) = options.seed {
        harness = harness.seed(seed);
    }

    for kind in options.kinds() {
        debug!("building the {} agent", kind);
        harness = harness.add_agent(options.agent(kind, &vocabulary)?);
        if options.baseline == Some(kind) {
            harness = harness.and_baseline();
        }
    }

    let record = harness.run()?;
    record.print_report()?;

    if let Some(path) = &options.json {
        record
            .save_json(path)
            .with_context(|| format!("could not write {}", path.display()))?;
        info!("wrote summaries to {}", path.display());
    }

    Ok(())
}
