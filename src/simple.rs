//! # Simple — Single-Pass Sieve and Base Prime Finder
//!
//! Sieves the whole range `[0, n]` in one [`PackedBits`] buffer laid out by a
//! [`CandidateScheme`]. Used directly for bounds below the dispatch threshold,
//! and over `[0, ⌊√n⌋]` to produce the base primes for the segmented path.
//!
//! ## Algorithm
//!
//! 1. Allocate one bit per candidate in `[0, n]`, all set; clear index 0 (1).
//! 2. For each index whose number `p` satisfies `p² ≤ n`: if still set, clear
//!    every candidate multiple of `p` from `p²` up. Smaller multiples carry a
//!    smaller prime factor and are already cleared.
//! 3. Emit the scheme's excluded primes, then every surviving bit in order.
//!
//! Complexity: O(n log log n) time, `candidate_count(n)` bits of memory.

use crate::bitset::PackedBits;
use crate::scheme::CandidateScheme;
use crate::Sink;

/// Sieve `[0, n]` in one pass, emitting primes in increasing order.
///
/// Returns the number of primes `≤ n`. For `n < 2` the sink is never called.
pub fn sieve<S: CandidateScheme>(n: u64, sink: &mut dyn Sink) -> u64 {
    if n < 2 {
        return 0;
    }

    let bits = mark_composites::<S>(n);

    let mut count = 0u64;
    for &p in S::EXCLUDED {
        if p <= n {
            sink.emit(p);
            count += 1;
        }
    }
    for index in bits.iter_set_bits() {
        let p = S::index_to_number(index as u64);
        if p > n {
            break;
        }
        sink.emit(p);
        count += 1;
    }
    count
}

/// All primes `≤ limit` in increasing order.
///
/// Feeds the segmented engine: every composite `c ≤ limit²` has a prime
/// factor in this list.
pub fn base_primes<S: CandidateScheme>(limit: u64) -> Vec<u64> {
    let mut primes = Vec::with_capacity(prime_count_upper(limit));
    sieve::<S>(limit, &mut primes);
    primes
}

/// Build and sieve the candidate bitset for `[0, n]`. Requires `n >= 2`.
fn mark_composites<S: CandidateScheme>(n: u64) -> PackedBits {
    let mut bits = PackedBits::new_all_set(S::candidate_count(n) as usize);
    bits.clear(0);

    let mut i = 1u64;
    loop {
        let p = S::index_to_number(i);
        if p * p > n {
            break;
        }
        if bits.get(i as usize) {
            let stride = S::stride(p);
            let mut m = p * p;
            while m <= n {
                if S::is_candidate(m) {
                    bits.clear(S::number_to_index(m) as usize);
                }
                m += stride;
            }
        }
        i += 1;
    }
    bits
}

/// Upper bound on π(n) for pre-allocation, never more than `n`.
pub(crate) fn prime_count_upper(n: u64) -> usize {
    if n < 10 {
        return n.min(4) as usize;
    }
    let nf = n as f64;
    ((1.3 * nf / nf.ln()) as u64).min(n) as usize
}
