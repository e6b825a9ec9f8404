//! Wordle Bot - CLI
//!
//! Word game solver with a TUI assistant, single-game and batch modes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Color;
use std::path::{Path, PathBuf};
use wordle_bot::{
    commands::{
        BatchConfig, DEFAULT_SEED, TargetChoice, prepare_index, report_cache_outcome,
        run_batch, run_benchmark, run_build_index, solve_word, write_unsolved,
    },
    core::{Vocabulary, Word},
    output::{
        RenderConfig, RenderStyle, TerminalDisplay, formatters::tint, print_batch_report,
        print_game_summary, print_index_stats,
    },
    solver::{MAX_ROUNDS, Solver, SolverConfig, Strategy, StrategyKind},
    wordlists::loader::{embedded_vocabulary, load_from_file},
};

#[derive(Parser)]
#[command(
    name = "wordle_bot",
    about = "Five-letter word game solver using letter frequencies and a precomputed feedback index",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wordlist: 'embedded' (default) or path to a whitespace-separated file
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// Cache the pattern index at this path
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Strategy: frequency (default), partition or damped
    #[arg(short, long, global = true, default_value = "frequency", value_parser = parse_strategy)]
    strategy: StrategyKind,

    /// Guesses allowed per game
    #[arg(long, global = true, default_value_t = MAX_ROUNDS)]
    max_rounds: usize,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Show feedback as colored squares
    #[arg(long, global = true)]
    emoji: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive assistant for a game played elsewhere (default)
    Play,

    /// Solve a single word, or a random one if none is given
    Solve {
        /// The target word to solve
        word: Option<Word>,

        /// Seed for picking the random target
        #[arg(long)]
        seed: Option<u64>,

        /// Show how many candidates remain after each guess
        #[arg(short, long)]
        verbose: bool,
    },

    /// Test solver on every word in the vocabulary
    TestAll {
        /// Limit number of words to test
        #[arg(short, long)]
        limit: Option<usize>,

        /// Play games one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,

        /// Write unsolved words to this file
        #[arg(long)]
        unsolved_out: Option<PathBuf>,
    },

    /// Benchmark solver on a random sample of words
    Benchmark {
        /// Number of random words to test
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Seed for the sample
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Build (or load) the pattern index and print its statistics
    BuildIndex,
}

fn parse_strategy(name: &str) -> Result<StrategyKind, String> {
    StrategyKind::from_name(name).ok_or_else(|| {
        format!(
            "unknown strategy '{name}', expected one of: {}",
            StrategyKind::NAMES.join(", ")
        )
    })
}

/// Load the vocabulary selected by the -w flag
fn load_vocabulary(wordlist: &str) -> Result<Vocabulary> {
    match wordlist {
        "embedded" => embedded_vocabulary().context("loading embedded word list"),
        path => load_from_file(path).with_context(|| format!("loading word list from {path}")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let render = RenderConfig {
        color: !cli.no_color,
        style: if cli.emoji {
            RenderStyle::Emoji
        } else {
            RenderStyle::Letters
        },
    };

    let vocab = load_vocabulary(&cli.wordlist)?;
    let command = cli.command.unwrap_or(Commands::Play);

    if let Commands::BuildIndex = command {
        return run_build_index_command(&vocab, cli.cache.as_deref(), &render);
    }

    let (index, outcome) =
        prepare_index(&vocab, cli.cache.as_deref(), true).context("preparing pattern index")?;
    if let (Some(path), Some(outcome)) = (&cli.cache, &outcome) {
        report_cache_outcome(path, outcome, &render);
    }

    let config = SolverConfig {
        max_rounds: cli.max_rounds,
    };
    let solver = Solver::new(cli.strategy, &vocab, &index, config)?;

    match command {
        Commands::Play => run_play_command(&solver),
        Commands::Solve {
            word,
            seed,
            verbose,
        } => run_solve_command(&solver, word, seed, verbose, &render),
        Commands::TestAll {
            limit,
            sequential,
            unsolved_out,
        } => run_test_all_command(&solver, limit, sequential, unsolved_out.as_deref(), &render),
        Commands::Benchmark { count, seed } => {
            run_benchmark_command(&solver, count, seed, &render);
            Ok(())
        }
        Commands::BuildIndex => Ok(()),
    }
}

fn run_build_index_command(
    vocab: &Vocabulary,
    cache: Option<&Path>,
    render: &RenderConfig,
) -> Result<()> {
    let (stats, outcome) =
        run_build_index(vocab, cache, true).context("building pattern index")?;
    if let (Some(path), Some(outcome)) = (cache, &outcome) {
        report_cache_outcome(path, outcome, render);
    }
    print_index_stats(&stats, render);
    Ok(())
}

fn run_solve_command(
    solver: &Solver<StrategyKind>,
    word: Option<Word>,
    seed: Option<u64>,
    verbose: bool,
    render: &RenderConfig,
) -> Result<()> {
    if let Some(word) = word
        && !solver.vocabulary().contains(&word)
    {
        eprintln!(
            "{} {word} is not in the word list; the solver may run out of candidates",
            tint("warning:", Color::Yellow, render)
        );
    }

    let mut display = TerminalDisplay::new(*render);
    display.show_remaining = verbose;

    let (target, result) = solve_word(solver, TargetChoice::from_options(word, seed), &mut display)?;
    print_game_summary(&target, &result, render);
    Ok(())
}

fn run_test_all_command(
    solver: &Solver<StrategyKind>,
    limit: Option<usize>,
    sequential: bool,
    unsolved_out: Option<&Path>,
    render: &RenderConfig,
) -> Result<()> {
    let words = solver.vocabulary().words();
    println!(
        "Testing {} of {} words with the {} strategy",
        limit.map_or(words.len(), |n| n.min(words.len())),
        words.len(),
        solver.strategy().name()
    );

    let config = BatchConfig {
        limit,
        parallel: !sequential,
        progress: true,
    };
    let report = run_batch(solver, words, &config);
    print_batch_report(&report, render);

    if let Some(path) = unsolved_out {
        write_unsolved(path, &report)
            .with_context(|| format!("writing unsolved words to {}", path.display()))?;
        println!("\nWrote {} unsolved words to {}", report.unsolved.len(), path.display());
    }
    Ok(())
}

fn run_benchmark_command(
    solver: &Solver<StrategyKind>,
    count: usize,
    seed: Option<u64>,
    render: &RenderConfig,
) {
    let seed = seed.unwrap_or(DEFAULT_SEED);
    println!("Running benchmark on {count} random words (seed {seed})...");

    let report = run_benchmark(solver, count, seed, &BatchConfig::default());
    print_batch_report(&report, render);
}

fn run_play_command(solver: &Solver<StrategyKind>) -> Result<()> {
    use wordle_bot::interactive::{App, run_tui};

    let app = App::new(solver);
    run_tui(app)
}
