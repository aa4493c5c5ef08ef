//! # Engine — Path Selection and Run Reports
//!
//! Chooses between the single-pass and segmented sieves and wraps a run with
//! validation, timing and logging.
//!
//! The single-pass buffer grows with `n` (`n / 2` bits in the odd layout), so
//! it is only used below [`DEFAULT_THRESHOLD`]: 10^7 numbers is a 625 KiB
//! buffer that still sits in L2. Above it, the segmented path holds one
//! window plus `π(√n)` base primes regardless of `n`.
//!
//! ## Limits
//!
//! - [`MAX_LIMIT`] (2^62): every intermediate the engines form (`p²`, a
//!   window end, `m + 2p`) stays below `u64::MAX`.
//! - [`MAX_SINGLE_PASS_LIMIT`] (2^36): a forced single pass allocates at most
//!   4 GiB of bits.
//! - [`MAX_WINDOW_SPAN`] (2^32): caps one window buffer at 256 MiB.
//! - Any buffer the target cannot address (a 2^36 single pass on a 32-bit
//!   target) is rejected before allocation.

use crate::scheme::{CandidateScheme, OddOnly, SchemeKind, Wheel6};
use crate::segmented::{self, DEFAULT_WINDOW_SPAN};
use crate::{simple, Sink};
use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Largest accepted bound.
pub const MAX_LIMIT: u64 = 1 << 62;

/// Largest bound the single-pass path accepts when forced.
pub const MAX_SINGLE_PASS_LIMIT: u64 = 1 << 36;

/// Largest accepted window span.
pub const MAX_WINDOW_SPAN: u64 = 1 << 32;

/// Bounds below this use the single-pass path under [`Strategy::Auto`].
pub const DEFAULT_THRESHOLD: u64 = 10_000_000;

/// Largest allocation, in bytes, this target can make for one buffer.
const ADDRESSABLE_BYTES: u64 = isize::MAX as u64;

/// Whether a bit buffer covering `span` consecutive numbers fits in
/// `max_bytes` and its bit count fits in `usize`. Both layouts keep at most
/// one bit per odd number.
fn buffer_fits(span: u64, max_bytes: u64) -> bool {
    let bits = span / 2 + 1;
    bits.div_ceil(8) <= max_bytes && usize::try_from(bits).is_ok()
}

/// How the dispatcher picks a path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Single-pass below the threshold, segmented at or above it.
    #[default]
    Auto,
    /// Always sieve the full range in one buffer.
    SinglePass,
    /// Always sieve in windows.
    Segmented,
}

/// The path a run actually took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SievePath {
    SinglePass,
    Segmented,
}

/// Engine settings, fixed for the duration of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SieveConfig {
    pub scheme: SchemeKind,
    pub strategy: Strategy,
    pub threshold: u64,
    pub window_span: u64,
}

impl Default for SieveConfig {
    fn default() -> Self {
        SieveConfig {
            scheme: SchemeKind::Odd,
            strategy: Strategy::Auto,
            threshold: DEFAULT_THRESHOLD,
            window_span: DEFAULT_WINDOW_SPAN,
        }
    }
}

impl SieveConfig {
    /// Check the settings on their own, independent of any bound.
    pub fn validate(&self) -> Result<()> {
        if self.window_span == 0 {
            anyhow::bail!("window_span must be at least 1");
        }
        if self.window_span > MAX_WINDOW_SPAN {
            anyhow::bail!(
                "window_span {} exceeds the maximum of {}",
                self.window_span,
                MAX_WINDOW_SPAN
            );
        }
        if !buffer_fits(self.window_span, ADDRESSABLE_BYTES) {
            anyhow::bail!(
                "window_span {} needs a larger buffer than this platform can address",
                self.window_span
            );
        }
        if self.threshold > MAX_SINGLE_PASS_LIMIT {
            anyhow::bail!(
                "threshold {} exceeds the single-pass maximum of {}",
                self.threshold,
                MAX_SINGLE_PASS_LIMIT
            );
        }
        Ok(())
    }

    /// Check the settings against a concrete bound `n`.
    pub fn validate_for(&self, n: u64) -> Result<()> {
        self.validate()?;
        if n > MAX_LIMIT {
            anyhow::bail!("limit {} exceeds the maximum of {}", n, MAX_LIMIT);
        }
        if self.path_for(n) == SievePath::SinglePass && n > MAX_SINGLE_PASS_LIMIT {
            anyhow::bail!(
                "limit {} is too large for the single-pass strategy (maximum {})",
                n,
                MAX_SINGLE_PASS_LIMIT
            );
        }
        if self.path_for(n) == SievePath::SinglePass && !buffer_fits(n, ADDRESSABLE_BYTES) {
            anyhow::bail!(
                "limit {} needs a larger single-pass buffer than this platform can address",
                n
            );
        }
        Ok(())
    }

    /// The path the dispatcher takes for `n`.
    pub fn path_for(&self, n: u64) -> SievePath {
        match self.strategy {
            Strategy::SinglePass => SievePath::SinglePass,
            Strategy::Segmented => SievePath::Segmented,
            Strategy::Auto if n < self.threshold => SievePath::SinglePass,
            Strategy::Auto => SievePath::Segmented,
        }
    }
}

/// Dispatch one computation with a fixed scheme. Returns the prime count.
///
/// No validation happens here; callers go through [`run`] or respect the
/// limits documented on this module.
pub fn compute<S: CandidateScheme>(n: u64, config: &SieveConfig, sink: &mut dyn Sink) -> u64 {
    let path = config.path_for(n);
    debug!(n, scheme = S::NAME, ?path, "dispatching sieve");
    match path {
        SievePath::SinglePass => simple::sieve::<S>(n, sink),
        SievePath::Segmented => segmented::sieve::<S>(n, config.window_span, sink),
    }
}

/// Summary of one validated run.
#[derive(Clone, Debug, Serialize)]
pub struct SieveReport {
    pub limit: u64,
    pub count: u64,
    pub scheme: SchemeKind,
    pub path: SievePath,
    /// Windows walked; zero for the single-pass path.
    pub windows: u64,
    #[serde(serialize_with = "as_secs_f64")]
    pub elapsed: Duration,
}

fn as_secs_f64<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Validate, pick the configured scheme, sieve `[0, n]` and time it.
pub fn run(n: u64, config: &SieveConfig, sink: &mut dyn Sink) -> Result<SieveReport> {
    config.validate_for(n)?;

    let path = config.path_for(n);
    let windows = match path {
        SievePath::SinglePass => 0,
        SievePath::Segmented => segmented::window_count(n, config.window_span),
    };

    let start = Instant::now();
    let count = match config.scheme {
        SchemeKind::Odd => compute::<OddOnly>(n, config, sink),
        SchemeKind::Wheel6 => compute::<Wheel6>(n, config, sink),
    };
    let elapsed = start.elapsed();

    info!(
        limit = n,
        count,
        scheme = config.scheme.name(),
        ?path,
        windows,
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        "sieve complete"
    );

    Ok(SieveReport {
        limit: n,
        count,
        scheme: config.scheme,
        path,
        windows,
        elapsed,
    })
}
