use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use reversal::trace::{edges, parse_runs, step_line};
use reversal::{Move, Outcome, Puzzle, SolverConfig, SolverError, Strategy};

#[derive(Parser)]
#[command(version, about = "Reverse a sequence of distinct integers by splits and merges")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one puzzle with one strategy.
    #[command(allow_negative_numbers = true)]
    Solve(SolveArgs),
    /// Summarise the moves recorded in a trace file.
    Trace { file: PathBuf },
}

#[derive(Args)]
struct SolveArgs {
    /// The initial sequence, e.g. `5 3 9`.
    #[arg(required = true)]
    values: Vec<String>,
    #[arg(short, long, value_enum, default_value_t = Strategy::AStar)]
    strategy: Strategy,
    /// JSON file with solver parameters; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    beam_width: Option<usize>,
    #[arg(long)]
    temperature: Option<f64>,
    #[arg(long)]
    randomness: Option<f64>,
    #[arg(long)]
    random_steps: Option<usize>,
    #[arg(long)]
    attempts: Option<usize>,
    /// Time budget of the time-boxed beam, in seconds.
    #[arg(long)]
    max_time: Option<f64>,
    /// Wall-clock limit for any strategy, in seconds.
    #[arg(long)]
    deadline: Option<f64>,
}

impl SolveArgs {
    fn config(&self) -> Result<SolverConfig, SolverError> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::from_file(path)?,
            None => SolverConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(beam_width) = self.beam_width {
            config.beam_width = beam_width;
            config.time_boxed_beam_width = beam_width;
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(randomness) = self.randomness {
            config.randomness = randomness;
        }
        if let Some(random_steps) = self.random_steps {
            config.random_steps = random_steps;
        }
        if let Some(attempts) = self.attempts {
            config.attempts = attempts;
        }
        if let Some(max_time) = self.max_time {
            config.max_time_seconds = max_time;
        }
        if self.deadline.is_some() {
            config.deadline_seconds = self.deadline;
        }
        config.validate()?;
        return Ok(config);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Solve(args) => solve(&args),
        Command::Trace { file } => summarise(&file),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn solve(args: &SolveArgs) -> Result<(), SolverError> {
    let puzzle: Puzzle = args.values.join(" ").parse()?;
    let config = args.config()?;
    println!("Initial state: {}", puzzle.initial());
    println!("Target state: {}", puzzle.goal());
    let report = config.run(args.strategy, &puzzle)?;
    let seconds = report.elapsed.as_secs_f64();
    match &report.outcome {
        Outcome::Solved(path) => {
            let minimal = if report.proven_minimal { " (minimal)" } else { "" };
            println!(
                "{}: {} moves{}, {:.4} seconds",
                report.strategy.bold(),
                path.moves(),
                minimal,
                seconds
            );
            println!("0: {}", path[0]);
            for (step, pair) in path.windows(2).enumerate() {
                let label = match puzzle.move_between(&pair[0], &pair[1]) {
                    Some(Move::Split { .. }) => "split".green(),
                    Some(Move::Merge { .. }) => "merge".yellow(),
                    None => "illegal".red(),
                };
                println!("{}", step_line(step + 1, &pair[1], label));
            }
        }
        outcome => println!(
            "{}: {}, {:.4} seconds",
            report.strategy.bold(),
            outcome.to_string().red(),
            seconds
        ),
    }
    Ok(())
}

fn summarise(file: &PathBuf) -> Result<(), SolverError> {
    let text = fs::read_to_string(file)?;
    for (index, run) in parse_runs(&text)?.iter().enumerate() {
        println!("run {} ({} states)", index, run.len());
        for (from, to, kind) in edges(run) {
            println!("  {} -> {}  {}", from, to, kind);
        }
    }
    Ok(())
}
