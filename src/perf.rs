//! Evaluating and comparing agents.

use std::{fmt::Display, io::Write, ops::Deref, time::Duration};

use comfy_table::{Cell, Color, ColumnConstraint, Row, Table, Width};
#[cfg(feature = "stats")]
use owo_colors::{AnsiColors, OwoColorize, Stream};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{Attempts, Result, Strategy, Word, MAX_ATTEMPTS};

#[cfg(feature = "stats")]
use crate::{
    stats::{Tails, WelchsT},
    WordleError,
};

/// The number of histogram bins: one per possible score, the last for
/// failures.
pub const NUM_BINS: usize = MAX_ATTEMPTS + 1;

/// A record of one agent's games after being run by the
/// [test harness](crate::Harness).
///
/// This struct can provide statistics about the games on its own, but it
/// is recommended to produce a [`Summary`] first to cache the computations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Perf {
    pub(crate) tries: Vec<(Word, Attempts, Duration)>,
    strategy_name: String,
}

impl Perf {
    /// Creates a new empty performance record.
    pub(crate) fn new(strat: &dyn Strategy) -> Self {
        Perf {
            tries: Vec::new(),
            strategy_name: format!("{} v{}", strat, strat.version()),
        }
    }

    /// Gets the name of the strategy that produced this performance record.
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    /// Every game played: the target, the attempts and the time it took.
    pub fn tries(&self) -> &[(Word, Attempts, Duration)] {
        &self.tries
    }

    /// Gets the number of puzzles attempted.
    pub fn num_tried(&self) -> u32 {
        self.tries.len() as u32
    }

    /// Gets the number of puzzles solved.
    pub fn num_solved(&self) -> u32 {
        self.tries.iter().filter(|(_, a, _)| a.solved()).count() as u32
    }

    /// Gets the number of puzzles the agent could not solve.
    pub fn num_missed(&self) -> u32 {
        self.num_tried() - self.num_solved()
    }

    /// Gets the sum of all scores, counting a failure as seven.
    pub fn cumulative_score(&self) -> u32 {
        self.tries.iter().map(|(_, a, _)| a.score() as u32).sum()
    }

    /// Gets the average score, counting a failure as seven.
    pub fn mean_score(&self) -> f32 {
        (self.cumulative_score() as f32) / (self.num_tried() as f32)
    }

    /// Gets the total time spent playing.
    pub fn total_time(&self) -> Duration {
        self.tries.iter().map(|(_, _, t)| *t).sum()
    }

    /// Prints the summary and then a table showing the attempts for each
    /// puzzle.
    pub fn print(&self) {
        print!("{}", self);
        let mut table = Table::new();
        if !table.is_tty() {
            table.set_table_width(80);
        } else {
            table.load_preset(comfy_table::presets::UTF8_FULL);
        }
        let columns = (table.get_table_width().unwrap_or(80) / 13).max(1) as usize;
        for chunk in self.tries.chunks(columns) {
            let mut row = Row::new();
            for (word, attempts, _) in chunk {
                let mut cell = Cell::new(format!("{}\n-----------\n{}", word, attempts));
                if !attempts.solved() {
                    cell = cell.bg(Color::Red).fg(Color::Black);
                }
                row.add_cell(cell);
            }
            table.add_row(row);
        }
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(11));
            columns
        ]);
        println!("{}", table);
    }

    /// Converts this performance record to a pre-calculated summary.
    pub fn to_summary(&self) -> Summary {
        let mut bins = [0; NUM_BINS];
        self.tries
            .iter()
            .for_each(|(_, attempts, _)| bins[attempts.score() - 1] += 1);

        let mean_time = if self.tries.is_empty() {
            Duration::ZERO
        } else {
            self.total_time() / self.num_tried()
        };

        Summary {
            strategy_name: &self.strategy_name,
            num_tried: self.num_tried(),
            num_solved: self.num_solved(),
            cumulative_score: self.cumulative_score(),
            mean_time,
            histogram: bins.into(),
        }
    }
}

impl Display for Perf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_summary())
    }
}

/// A summary of an agent's performance generated by the
/// [test harness](crate::Harness).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(crate = "serde_crate"))]
pub struct Summary<'a> {
    strategy_name: &'a str,
    num_tried: u32,
    num_solved: u32,
    cumulative_score: u32,
    mean_time: Duration,
    histogram: Histogram,
}

impl<'a> Summary<'a> {
    pub fn strategy_name(&self) -> &'a str {
        self.strategy_name
    }

    pub fn num_tried(&self) -> u32 {
        self.num_tried
    }

    pub fn num_solved(&self) -> u32 {
        self.num_solved
    }

    pub fn num_missed(&self) -> u32 {
        self.num_tried - self.num_solved
    }

    /// Gets the fraction of puzzles solved.
    pub fn frac_solved(&self) -> f32 {
        (self.num_solved as f32) / (self.num_tried as f32)
    }

    /// Gets the average score over every game, counting a failure as seven.
    pub fn mean_score(&self) -> f32 {
        (self.cumulative_score as f32) / (self.num_tried as f32)
    }

    /// Gets the number of guesses across all solved puzzles.
    pub fn cumulative_guesses_solved(&self) -> u32 {
        self.histogram
            .iter()
            .take(MAX_ATTEMPTS)
            .enumerate()
            .map(|(i, v)| (i as u32 + 1) * v)
            .sum::<u32>()
    }

    /// Gets the average number of guesses needed to solve a puzzle.
    ///
    /// This does not include puzzles that the agent was unable to solve.
    pub fn mean_guesses(&self) -> f32 {
        (self.cumulative_guesses_solved() as f32) / (self.num_solved as f32)
    }

    /// Gets the average wall-clock time of one game.
    pub fn mean_time(&self) -> Duration {
        self.mean_time
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Compares this summary against a baseline.
    #[cfg(feature = "stats")]
    pub fn compare<'b>(&self, baseline: &Summary<'b>) -> Result<Comparison<'a, 'b>> {
        if self == baseline {
            return Err(WordleError::SelfComparison);
        }

        Comparison::compare(self.clone(), baseline.clone(), 0.05)
    }

    pub fn print(&self, options: SummaryPrintOptions) -> Result<()> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", self)?;

        #[cfg(feature = "stats")]
        if let Some(baseline) = options.compare {
            let comparison = self.compare(&baseline)?;
            let diff = comparison.mean_score_diff();
            let verdict = if comparison.score_significant() {
                "a sig. diff."
            } else {
                "not a sig. diff."
            };
            writeln!(
                stdout,
                "Compared with {}: {} attempts on average, {}",
                baseline.strategy_name(),
                format!("{:+.2}", diff).if_supports_color(Stream::Stdout, |text| {
                    if diff.is_sign_negative() {
                        text.color(AnsiColors::Green)
                    } else {
                        text.color(AnsiColors::Red)
                    }
                }),
                verdict.if_supports_color(Stream::Stdout, |text| text.bold())
            )?;
        }

        if options.histogram {
            write!(stdout, "{}", self.histogram)?;
        }

        Ok(())
    }

    pub fn print_options() -> SummaryPrintOptions<'a> {
        SummaryPrintOptions::default()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SummaryPrintOptions<'a> {
    compare: Option<Summary<'a>>,
    histogram: bool,
}

impl<'a> SummaryPrintOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compare(self, baseline: &Summary<'a>) -> Self {
        Self {
            compare: Some(baseline.clone()),
            ..self
        }
    }

    pub fn histogram(self, histogram: bool) -> Self {
        Self { histogram, ..self }
    }
}

impl<'a> Display for Summary<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-^80}", self.strategy_name)?;
        writeln!(f, "Ran {} words", self.num_tried())?;
        writeln!(
            f,
            "Guessed {} correctly, or {:.1}%, and {} incorrectly",
            self.num_solved(),
            self.frac_solved() * 100.,
            self.num_missed()
        )?;
        writeln!(
            f,
            "Took {:.2} attempts on average, {:.2} on solved words",
            self.mean_score(),
            self.mean_guesses(),
        )?;
        writeln!(f, "Spent {:.4} seconds per word", self.mean_time.as_secs_f64())?;
        Ok(())
    }
}

/// The result of comparing a summary against a baseline.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct Comparison<'a, 'b> {
    this: Summary<'a>,
    baseline: Summary<'b>,
    solved: fishers_exact::FishersExactPvalues,
    scores: WelchsT<f64>,
}

#[cfg(feature = "stats")]
impl<'a, 'b> Comparison<'a, 'b> {
    /// Runs Welch's t-test on the scores and Fisher's exact test on the
    /// solve rates.
    pub fn compare(this: Summary<'a>, baseline: Summary<'b>, alpha: f64) -> Result<Self> {
        let scores = WelchsT::two_sample(
            this.histogram.samples(),
            baseline.histogram.samples(),
            alpha,
            Tails::Two,
        )?;

        let solved = fishers_exact::fishers_exact(&[
            this.num_solved(),
            baseline.num_solved(),
            this.num_missed(),
            baseline.num_missed(),
        ])
        .map_err(|_| WordleError::Stats)?;

        Ok(Self {
            this,
            baseline,
            solved,
            scores,
        })
    }

    pub fn mean_score_diff(&self) -> f32 {
        self.this.mean_score() - self.baseline.mean_score()
    }

    pub fn frac_solved_diff(&self) -> f32 {
        self.this.frac_solved() - self.baseline.frac_solved()
    }

    /// The p-value of the difference in mean score.
    pub fn score_p(&self) -> f64 {
        self.scores.p
    }

    /// The two-tailed p-value of the difference in solve rate.
    pub fn solved_p(&self) -> f64 {
        self.solved.two_tail_pvalue
    }

    pub fn score_significant(&self) -> bool {
        self.scores.is_significant()
    }

    pub fn solved_significant(&self) -> bool {
        self.solved.two_tail_pvalue < self.scores.alpha
    }
}

/// How many games took each number of attempts; the last bin counts
/// failures.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(crate = "serde_crate"))]
pub struct Histogram {
    bins: [u32; NUM_BINS],
}

impl Histogram {
    /// Expands the histogram back into one score per game.
    pub fn samples(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.bins
            .iter()
            .enumerate()
            .flat_map(|(i, &n)| std::iter::repeat((i + 1) as f64).take(n as usize))
    }
}

impl From<[u32; NUM_BINS]> for Histogram {
    fn from(other: [u32; NUM_BINS]) -> Self {
        Self { bins: other }
    }
}

impl Deref for Histogram {
    type Target = [u32; NUM_BINS];

    fn deref(&self) -> &Self::Target {
        &self.bins
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let max = self.iter().copied().max().unwrap_or(0);
        let digits =
            std::iter::successors(Some(max), |&n| (n >= 10).then(|| n / 10)).count() as u32;
        let count_per_mark = (max as f32 / (80. - digits as f32 - 6.)).max(1.0);

        for (i, &bin) in self.bins.iter().enumerate() {
            if i < MAX_ATTEMPTS {
                write!(f, "{} |", i + 1)?;
            } else {
                write!(f, "X |")?;
            }
            let marks = (bin as f32 / count_per_mark).floor() as usize;
            writeln!(f, "{:■>marks$} ({})", "", bin)?;
        }

        Ok(())
    }
}
