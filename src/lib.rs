//! # eratos — Bit-Packed Sieve of Eratosthenes
//!
//! Counts and enumerates the primes in `[0, n]`. Two engines share one
//! packed bitset type and one candidate layout abstraction:
//!
//! - [`simple`]: one buffer over the whole range, for `n` below a threshold.
//! - [`segmented`]: fixed-span windows over `(√n, n]`, sieved with the base
//!   primes `≤ √n`, so memory stays bounded for any `n`.
//!
//! [`engine`] picks the path and layout; [`compute`] is the default entry.
//! Primes leave the engines through a [`Sink`] in strictly increasing order.

pub mod bitset;
pub mod config;
pub mod engine;
pub mod scheme;
pub mod segmented;
pub mod simple;
pub mod sink;

pub use engine::{SieveConfig, SieveReport, Strategy, MAX_LIMIT};
pub use scheme::SchemeKind;

/// Receiver of discovered primes.
///
/// Engines call `emit` synchronously, once per prime, in strictly increasing
/// order. `emit` is infallible from the engine's point of view; a sink backed
/// by fallible I/O handles its own errors (see [`sink::WriterSink`]).
pub trait Sink {
    fn emit(&mut self, prime: u64);
}

/// Count the primes `≤ n`, emitting each one to `sink`.
///
/// Uses the odd-only layout, the single-pass engine below
/// [`engine::DEFAULT_THRESHOLD`] and the segmented engine above it. Pass
/// [`sink::CountOnly`] to count without collecting.
///
/// # Panics
/// Panics if `n > MAX_LIMIT`. Use [`engine::run`] to get an error instead.
pub fn compute(n: u64, sink: &mut dyn Sink) -> u64 {
    assert!(n <= MAX_LIMIT, "limit {} exceeds the maximum of {}", n, MAX_LIMIT);
    engine::compute::<scheme::OddOnly>(n, &SieveConfig::default(), sink)
}

/// Collect the primes `≤ n` into a vector.
pub fn primes_up_to(n: u64) -> Vec<u64> {
    let mut primes = Vec::with_capacity(simple::prime_count_upper(n.min(MAX_LIMIT)));
    compute(n, &mut primes);
    primes
}
