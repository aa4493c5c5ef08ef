//! # Main — CLI Entry Point
//!
//! `eratos <LIMIT> [OUTPUT_FILE]` counts the primes up to `LIMIT`, optionally
//! writing them one per line to `OUTPUT_FILE`, and reports the elapsed time.
//!
//! ## Options
//!
//! - `--scheme odd|wheel6` / `ERATOS_SCHEME`: candidate layout.
//! - `--strategy auto|single-pass|segmented` / `ERATOS_STRATEGY`.
//! - `--threshold`: auto strategy switches to segmented at this bound.
//! - `--window-span`: numbers per segmented window.
//! - `--config` / `ERATOS_CONFIG`: TOML settings file (flags win over it).
//! - `--json`: print the run report as one JSON object.
//!
//! Logs go to stderr; `RUST_LOG` sets the level, `LOG_FORMAT=json` switches
//! to structured JSON lines.

mod cli;

use anyhow::Result;
use clap::Parser;
use eratos::{SchemeKind, Strategy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "eratos",
    version,
    about = "Find all primes up to a bound with a bit-packed sieve of Eratosthenes"
)]
struct Cli {
    /// Find all primes up to this number (inclusive)
    limit: u64,

    /// Write primes to this file, one per line
    output_file: Option<PathBuf>,

    /// Candidate layout: odd numbers only, or numbers coprime to 6
    #[arg(long, value_enum, env = "ERATOS_SCHEME")]
    scheme: Option<SchemeKind>,

    /// Force a sieve path instead of choosing by threshold
    #[arg(long, value_enum, env = "ERATOS_STRATEGY")]
    strategy: Option<Strategy>,

    /// Bound at which the auto strategy switches to the segmented sieve
    #[arg(long)]
    threshold: Option<u64>,

    /// Numbers covered by each segmented window
    #[arg(long)]
    window_span: Option<u64>,

    /// Path to a TOML settings file
    #[arg(long, env = "ERATOS_CONFIG")]
    config: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for log shippers, human-readable otherwise; stdout is
    // reserved for results either way.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::run(&cli)
}
