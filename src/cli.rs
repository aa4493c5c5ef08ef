//! # CLI Execution
//!
//! Resolves settings from flags and the config file, wires the optional
//! output file to the engine as a sink, and prints the report.
//!
//! An output file that cannot be opened, or that fails mid-run, is reported on
//! stderr and the run finishes count-only; the count is still printed and the
//! exit status stays 0.

use anyhow::Result;
use eratos::config::{self, SieveSettings};
use eratos::engine::{self, SieveConfig, SieveReport};
use eratos::sink::{CountOnly, WriterSink};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use super::Cli;

/// Run one sieve as described by the command line.
pub fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    config.validate_for(cli.limit)?;

    let mut file_sink = cli.output_file.as_deref().and_then(|path| {
        WriterSink::create(path)
            .map_err(|e| {
                eprintln!("Error: {:#}", e);
                warn!(path = %path.display(), "continuing without output file");
            })
            .ok()
    });

    let report = match file_sink.as_mut() {
        Some(sink) => engine::run(cli.limit, &config, sink)?,
        None => engine::run(cli.limit, &config, &mut CountOnly)?,
    };

    let written_to = match (file_sink, cli.output_file.as_deref()) {
        (Some(sink), Some(path)) => match sink.finish() {
            Ok(_) => Some(path),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                None
            }
        },
        _ => None,
    };

    if cli.json {
        print_json(&report, written_to)?;
    } else {
        print_summary(&report, written_to);
    }
    Ok(())
}

/// Merge config file settings under command-line flags.
fn resolve_config(cli: &Cli) -> Result<SieveConfig> {
    let from_file = match &cli.config {
        Some(path) => config::load(path)?.sieve,
        None => SieveSettings::default(),
    };
    let from_flags = SieveSettings {
        scheme: cli.scheme,
        strategy: cli.strategy,
        threshold: cli.threshold,
        window_span: cli.window_span,
    };
    from_file.merge(from_flags).resolve()
}

fn print_summary(report: &SieveReport, written_to: Option<&Path>) {
    println!("Primes found: {}", report.count);
    println!("Time elapsed: {}", format_elapsed(report.elapsed));
    if let Some(path) = written_to {
        println!("Primes written to: {}", path.display());
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a SieveReport,
    output_file: Option<String>,
}

fn print_json(report: &SieveReport, written_to: Option<&Path>) -> Result<()> {
    let out = JsonOutput {
        report,
        output_file: written_to.map(|p| p.display().to_string()),
    };
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}

/// Human-readable duration: microseconds below 1 ms, milliseconds below 1 s.
fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2} microseconds", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.3} milliseconds", secs * 1e3)
    } else {
        format!("{:.6} seconds", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use eratos::{SchemeKind, Strategy};

    #[test]
    fn format_elapsed_picks_unit() {
        assert_eq!(format_elapsed(Duration::from_nanos(1_500)), "1.50 microseconds");
        assert_eq!(format_elapsed(Duration::from_micros(2_500)), "2.500 milliseconds");
        assert_eq!(format_elapsed(Duration::from_millis(1_250)), "1.250000 seconds");
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eratos.toml");
        std::fs::write(&path, "[sieve]\nscheme = \"wheel6\"\nwindow_span = 512\n").unwrap();

        let cli = Cli::try_parse_from([
            "eratos",
            "1000",
            "--config",
            path.to_str().unwrap(),
            "--window-span",
            "64",
            "--strategy",
            "segmented",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.scheme, SchemeKind::Wheel6);
        assert_eq!(config.window_span, 64);
        assert_eq!(config.strategy, Strategy::Segmented);
    }

    #[test]
    fn json_output_flattens_report() {
        let report = engine::run(100, &SieveConfig::default(), &mut CountOnly).unwrap();
        let out = JsonOutput {
            report: &report,
            output_file: Some("primes.txt".to_string()),
        };
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["count"], 25);
        assert_eq!(value["limit"], 100);
        assert_eq!(value["output_file"], "primes.txt");
    }
}
