//! CLI tool to filter a vehicle CSV by electric range.
//!
//! Usage:
//!   ev-etl <input.csv> <output.csv>
//!   ev-etl <input.csv> <output.csv> --min-range 150 --column "Electric Range"
//!
//! Prints a banner, optional progress lines, and a summary to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to change the
//! filter.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use ev_etl::{DEFAULT_COLUMN, DEFAULT_MIN_RANGE, DEFAULT_PROGRESS_EVERY, FilterConfig, run_files};
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt};

/// Copy the rows of a vehicle CSV whose electric range exceeds a threshold.
#[derive(Parser)]
#[command(name = "ev-etl", version)]
struct Cli {
    /// Input CSV file
    input: PathBuf,

    /// Output CSV file (created or overwritten)
    output: PathBuf,

    /// Keep rows whose range is strictly greater than this
    #[arg(short = 'r', long, default_value_t = DEFAULT_MIN_RANGE, allow_negative_numbers = true)]
    min_range: i64,

    /// Header name of the column to filter on
    #[arg(short, long, default_value = DEFAULT_COLUMN)]
    column: String,

    /// Print a progress line every N rows (0 disables)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
    progress_every: u64,

    /// Log each invalid row on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            println!("{}", Cli::command().render_usage());
            println!();
            println!("Filter vehicle records by electric range.");
            println!();
            println!("Arguments:");
            println!("  <input.csv>   Input CSV file with an '{DEFAULT_COLUMN}' column");
            println!("  <output.csv>  Output CSV file for eligible rows");
            process::exit(1);
        }
    };

    init_logging(cli.verbose);

    let config = FilterConfig::new()
        .with_column(cli.column)
        .with_min_range(cli.min_range)
        .with_progress_every(cli.progress_every);

    println!("Starting ETL process...");
    println!("Input: {}", cli.input.display());
    println!("Output: {}", cli.output.display());
    println!("Min range: {}", config.min_range);

    let start = Instant::now();
    let result = run_files(&cli.input, &cli.output, &config, |processed| {
        println!("Processed {processed} records...");
    });

    match result {
        Ok(stats) => println!("{}", stats.report(start.elapsed())),
        Err(e) => {
            println!("Error: {e}");
            process::exit(1);
        }
    }
}
