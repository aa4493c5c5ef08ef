//! # Scheme — Candidate Index Layouts
//!
//! Maps the numbers a sieve has to track onto dense bit positions. Numbers
//! that are composite by construction (even numbers, or multiples of 2 and 3)
//! never get a bit, which shrinks the sieve buffer 2× or 3×.
//!
//! | Scheme   | Candidates         | index → number      | Excluded primes |
//! |----------|--------------------|---------------------|-----------------|
//! | `OddOnly`| odd numbers        | `2i + 1`            | 2               |
//! | `Wheel6` | `≡ 1, 5 (mod 6)`   | `3i + 1 + (i & 1)`  | 2, 3            |
//!
//! Index 0 is always the number 1, which is not prime and is never reached by
//! a marking walk, so the single-pass engine clears it explicitly.
//!
//! Schemes are zero-sized types behind the [`CandidateScheme`] trait. The
//! engines are generic over it, so the layout is fixed per instantiation and
//! all mapping arithmetic inlines into the marking loops.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Bijection between candidate numbers and bit indices.
pub trait CandidateScheme {
    /// Short name used in logs and reports.
    const NAME: &'static str;

    /// Primes that are not candidates and must be emitted directly.
    const EXCLUDED: &'static [u64];

    /// Bit index of candidate `n`. Undefined for non-candidates.
    fn number_to_index(n: u64) -> u64;

    /// Candidate number stored at bit `index`.
    fn index_to_number(index: u64) -> u64;

    /// Whether `n` has a bit in this layout.
    fn is_candidate(n: u64) -> bool;

    /// Number of candidates in `[0, n]`.
    fn candidate_count(n: u64) -> u64;

    /// Numeric step between successive multiples visited when marking `p`.
    #[inline]
    fn stride(p: u64) -> u64 {
        2 * p
    }

    /// Smallest odd multiple of `p` that is `>= from`. Marking walks start here.
    ///
    /// `p` must be an odd prime.
    #[inline]
    fn first_multiple(p: u64, from: u64) -> u64 {
        let m = from.div_ceil(p) * p;
        if m.is_multiple_of(2) {
            m + p
        } else {
            m
        }
    }
}

/// Odd numbers only: bit `i` is the number `2i + 1`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OddOnly;

impl CandidateScheme for OddOnly {
    const NAME: &'static str = "odd";
    const EXCLUDED: &'static [u64] = &[2];

    #[inline]
    fn number_to_index(n: u64) -> u64 {
        n / 2
    }

    #[inline]
    fn index_to_number(index: u64) -> u64 {
        2 * index + 1
    }

    #[inline]
    fn is_candidate(n: u64) -> bool {
        n % 2 == 1
    }

    #[inline]
    fn candidate_count(n: u64) -> u64 {
        n.div_ceil(2)
    }
}

/// Mod-6 wheel: tracks 1, 5, 7, 11, 13, 17, ... (numbers coprime to 6).
///
/// Odd multiples of a prime are evenly spaced in number space but not in
/// index space, so the marking walk steps by `2p` and skips multiples that
/// fall on `3 (mod 6)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wheel6;

impl CandidateScheme for Wheel6 {
    const NAME: &'static str = "wheel6";
    const EXCLUDED: &'static [u64] = &[2, 3];

    #[inline]
    fn number_to_index(n: u64) -> u64 {
        n / 3
    }

    #[inline]
    fn index_to_number(index: u64) -> u64 {
        3 * index + 1 + (index & 1)
    }

    #[inline]
    fn is_candidate(n: u64) -> bool {
        matches!(n % 6, 1 | 5)
    }

    #[inline]
    fn candidate_count(n: u64) -> u64 {
        let r = n % 6;
        n / 6 * 2 + u64::from(r >= 1) + u64::from(r >= 5)
    }
}

/// Runtime name for a scheme, as accepted by the CLI and config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    /// Odd numbers only (2× density).
    #[default]
    Odd,
    /// Numbers coprime to 6 (3× density).
    Wheel6,
}

impl SchemeKind {
    pub fn name(self) -> &'static str {
        match self {
            SchemeKind::Odd => OddOnly::NAME,
            SchemeKind::Wheel6 => Wheel6::NAME,
        }
    }
}
