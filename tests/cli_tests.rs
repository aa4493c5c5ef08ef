//! CLI integration tests using assert_cmd.
//!
//! Each test runs the real `eratos` binary; file output goes to a tempdir.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn eratos() -> Command {
    let mut cmd = Command::cargo_bin("eratos").unwrap();
    cmd.env_remove("ERATOS_CONFIG")
        .env_remove("ERATOS_SCHEME")
        .env_remove("ERATOS_STRATEGY")
        .env_remove("LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

// --- Help and argument validation ---

#[test]
fn help_shows_arguments_and_options() {
    eratos().arg("--help").assert().success().stdout(
        predicate::str::contains("LIMIT")
            .and(predicate::str::contains("OUTPUT_FILE"))
            .and(predicate::str::contains("--scheme"))
            .and(predicate::str::contains("--strategy"))
            .and(predicate::str::contains("--window-span"))
            .and(predicate::str::contains("--threshold"))
            .and(predicate::str::contains("--config"))
            .and(predicate::str::contains("--json")),
    );
}

#[test]
fn missing_limit_fails() {
    eratos()
        .assert()
        .failure()
        .stderr(predicate::str::contains("LIMIT").or(predicate::str::contains("required")));
}

#[test]
fn non_numeric_limit_fails() {
    eratos()
        .arg("abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn negative_limit_fails() {
    eratos().arg("-5").assert().failure();
}

#[test]
fn limit_above_max_fails() {
    eratos()
        .arg("9223372036854775807")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum"));
}

#[test]
fn unknown_scheme_fails() {
    eratos()
        .args(["100", "--scheme", "wheel30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn zero_window_span_fails() {
    eratos()
        .args(["100", "--window-span", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("window_span"));
}

// --- Counting ---

#[test]
fn counts_primes_up_to_100() {
    eratos()
        .arg("100")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Primes found: 25")
                .and(predicate::str::contains("Time elapsed:")),
        );
}

#[test]
fn limit_below_two_finds_nothing() {
    for limit in ["0", "1"] {
        eratos()
            .arg(limit)
            .assert()
            .success()
            .stdout(predicate::str::contains("Primes found: 0"));
    }
}

#[test]
fn every_scheme_and_strategy_agree() {
    for scheme in ["odd", "wheel6"] {
        for strategy in ["auto", "single-pass", "segmented"] {
            eratos()
                .args(["100000", "--scheme", scheme, "--strategy", strategy])
                .assert()
                .success()
                .stdout(predicate::str::contains("Primes found: 9592"));
        }
    }
}

#[test]
fn scheme_from_environment() {
    eratos()
        .env("ERATOS_SCHEME", "wheel6")
        .args(["1000", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"scheme\":\"wheel6\""));
}

// --- Output file ---

#[test]
fn writes_primes_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("primes.txt");
    eratos()
        .args(["30", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Primes found: 10")
                .and(predicate::str::contains("Primes written to:")),
        );
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "2\n3\n5\n7\n11\n13\n17\n19\n23\n29\n");
}

/// The segmented path writes the same file as trial division predicts.
#[test]
fn segmented_file_matches_trial_division() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("primes.txt");
    eratos()
        .args([
            "5000",
            path.to_str().unwrap(),
            "--strategy",
            "segmented",
            "--window-span",
            "97",
        ])
        .assert()
        .success();
    let written: Vec<u64> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(written, common::naive_primes(5000));
}

#[test]
fn unwritable_output_falls_back_to_count_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("primes.txt");
    eratos()
        .args(["100", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Primes found: 25")
                .and(predicate::str::contains("Primes written to").not()),
        )
        .stderr(predicate::str::contains("could not open output file"));
}

// --- JSON and config file ---

#[test]
fn json_report() {
    let output = eratos()
        .args(["1000000", "--json", "--strategy", "segmented"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["limit"], 1_000_000);
    assert_eq!(report["count"], 78_498);
    assert_eq!(report["path"], "segmented");
    assert_eq!(report["scheme"], "odd");
    assert!(report["windows"].as_u64().unwrap() >= 1);
    assert!(report["output_file"].is_null());
}

#[test]
fn config_file_sets_scheme() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eratos.toml");
    std::fs::write(&path, "[sieve]\nscheme = \"wheel6\"\nthreshold = 100\n").unwrap();
    let output = eratos()
        .args(["1000", "--json", "--config", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["scheme"], "wheel6");
    assert_eq!(report["path"], "segmented");
    assert_eq!(report["count"], 168);
}

#[test]
fn invalid_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eratos.toml");
    std::fs::write(&path, "[sieve]\nbogus = 1\n").unwrap();
    eratos()
        .args(["100", "--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config file"));
}
