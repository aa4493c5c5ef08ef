//! Shared test helpers for integration tests.

#![allow(dead_code)]

use eratos::engine::{self, SieveConfig, Strategy};
use eratos::SchemeKind;

/// Trial-division primality check, independent of any sieve code.
pub fn is_prime_naive(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Primes `<= n` by trial division.
pub fn naive_primes(n: u64) -> Vec<u64> {
    (0..=n).filter(|&m| is_prime_naive(m)).collect()
}

/// Build a config with an explicit scheme, strategy and window span.
pub fn config(scheme: SchemeKind, strategy: Strategy, window_span: u64) -> SieveConfig {
    SieveConfig {
        scheme,
        strategy,
        window_span,
        ..SieveConfig::default()
    }
}

/// Run a validated sieve and collect everything it emitted.
pub fn collect(n: u64, config: &SieveConfig) -> (u64, Vec<u64>) {
    let mut primes = Vec::new();
    let report = engine::run(n, config, &mut primes).expect("sieve run failed");
    (report.count, primes)
}
