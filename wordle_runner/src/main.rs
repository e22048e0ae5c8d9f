use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod download;
mod run;

use run::{AgentKind, RunOptions};

#[derive(Debug, Subcommand, Clone)]
enum Commands {
    /// Benchmark agents against target words.
    Run(RunOptions),

    /// Download the guess and answer lists.
    Download {
        /// Directory the word lists are written to.
        #[arg(long, default_value = "data")]
        dir: PathBuf,
    },
}

/// Plays Wordle agents against many target words and compares them.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.command {
        Commands::Run(options) => run::run(options),
        Commands::Download { dir } => download::download(&dir),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_a_full_run() {
        let args = Args::try_parse_from([
            "wordle_runner",
            "run",
            "--words",
            "words.txt",
            "--agents",
            "random,entropy,explore",
            "--games",
            "20",
            "--samples",
            "100",
            "--baseline",
            "random",
            "--sequential",
        ])
        .unwrap();

        match args.command {
            Commands::Run(options) => {
                assert_eq!(
                    options.agents,
                    [AgentKind::Random, AgentKind::Entropy, AgentKind::Explore]
                );
                assert_eq!(options.games, Some(20));
                assert_eq!(options.samples, Some(100));
                assert_eq!(options.baseline, Some(AgentKind::Random));
                assert!(options.sequential);
                assert!(!options.all);
                assert_eq!(options.exploration_rounds, 3);
            }
            other => panic!("parsed the wrong command: {:?}", other),
        }
    }

    #[test]
    fn games_and_all_conflict() {
        assert!(Args::try_parse_from([
            "wordle_runner",
            "run",
            "--words",
            "words.txt",
            "--games",
            "5",
            "--all",
        ])
        .is_err());
    }

    #[test]
    fn download_defaults_to_data() {
        let args = Args::try_parse_from(["wordle_runner", "download"]).unwrap();
        assert!(matches!(args.command, Commands::Download { dir } if dir == PathBuf::from("data")));
    }
}
