//! Command-line interface for the term unifier.
//!
//! Parses term expressions given on the command line or in a file, unifies
//! them pairwise and prints the resulting substitutions.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand};
use robinson::batch::{self, Outcome};
use robinson::config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_STEPS, Limits, MAX_DEPTH_CEILING};
use robinson::fmt::{format_pair, format_report};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Deepest term the parser accepts and unification may build
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_max_depth)]
    max_depth: usize,

    /// Work-list pairs processed before a unification gives up
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Unifies two terms
    Unify { left: String, right: String },
    /// Parses a term and lists its variables
    Parse { term: String },
    /// Runs the built-in example pairs
    Examples,
    /// Runs pairs from a file, one `left =?= right` per line
    Batch { file: PathBuf },
}

fn parse_max_depth(value: &str) -> Result<usize, String> {
    let depth = value.parse::<usize>().map_err(|err| err.to_string())?;
    if depth == 0 || depth > MAX_DEPTH_CEILING {
        return Err(format!("must be between 1 and {}", MAX_DEPTH_CEILING));
    }
    Ok(depth)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let limits = Limits::default()
        .with_max_depth(args.max_depth)
        .with_max_steps(args.max_steps);

    match args.command {
        Commands::Unify { left, right } => {
            let report = batch::run_pair(&left, &right, &limits);
            if let Outcome::Malformed(err) = &report.outcome {
                anyhow::bail!("invalid pair {:?} =?= {:?}: {}", left, right, err);
            }
            println!("{}", format_pair(&report));
        }
        Commands::Parse { term } => {
            let parsed = robinson::parse_with(&term, &limits)
                .with_context(|| format!("invalid term {:?}", term))?;
            println!("{}", parsed);
            println!(
                "kind: {} {}/{}, depth: {}, ground: {}, variables: [{}]",
                parsed.kind(),
                parsed.name(),
                parsed.arity(),
                parsed.depth(),
                parsed.is_ground(),
                parsed.variables().join(", ")
            );
        }
        Commands::Examples => {
            let reports = batch::run_examples(&limits);
            print!("{}", format_report("Unification Examples:", &reports));
        }
        Commands::Batch { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let pairs = batch::parse_pairs(&text)
                .with_context(|| format!("malformed batch file {}", file.display()))?;
            let reports = batch::run_batch(pairs, &limits);
            let title = format!("Unification pairs from {}:", file.display());
            print!("{}", format_report(&title, &reports));
        }
    }

    Ok(())
}
