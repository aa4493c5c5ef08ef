//! # Segmented — Cache-Bounded Windowed Sieve
//!
//! Sieves `(⌊√n⌋, n]` in fixed-span windows so that peak memory stays at one
//! window buffer plus the base prime list, whatever the size of `n`.
//!
//! ## Algorithm
//!
//! 1. Find the base primes `≤ ⌊√n⌋` with the single-pass engine and emit them.
//! 2. Split `(⌊√n⌋, n]` into consecutive windows `[low, high]` of
//!    `window_span` numbers, the last one clamped to `n`.
//! 3. Per window: one bit per candidate, all set. For each base prime `p`
//!    outside the scheme's excluded set, clear candidate multiples from
//!    `max(low, p²)` to `high`.
//! 4. Emit the survivors in order and drop the window.
//!
//! Every composite `c ≤ n` has a prime factor `≤ √c ≤ √n`, so the base list
//! is enough to clear it. Windows are visited in ascending order, so the
//! emitted stream is sorted without any merge step.
//!
//! The default span of 2^18 numbers gives a 16 KiB buffer in the odd layout
//! (about 11 KiB with the wheel).

use crate::bitset::PackedBits;
use crate::scheme::CandidateScheme;
use crate::simple;
use crate::Sink;
use tracing::trace;

/// Default window span, in numbers.
pub const DEFAULT_WINDOW_SPAN: u64 = 1 << 18;

/// Sieve `[0, n]` window by window, emitting primes in increasing order.
///
/// Returns the number of primes `≤ n`. `window_span` must be non-zero and
/// only affects memory and speed, never the result.
pub fn sieve<S: CandidateScheme>(n: u64, window_span: u64, sink: &mut dyn Sink) -> u64 {
    assert!(window_span > 0, "window span must be positive");
    if n < 2 {
        return 0;
    }

    let root = n.isqrt();
    let base = simple::base_primes::<S>(root);

    let mut count = base.len() as u64;
    for &p in &base {
        sink.emit(p);
    }

    // Only reachable when the segmented path is forced for tiny n: an excluded
    // prime above √n has no candidate bit in any window.
    for &p in S::EXCLUDED {
        if p > root && p <= n {
            sink.emit(p);
            count += 1;
        }
    }

    let mut low = root + 1;
    while low <= n {
        let high = n.min(low.saturating_add(window_span - 1));
        let mut window = Window::<S>::new(low, high);
        window.mark(&base);
        let found = window.emit(sink);
        trace!(low, high, found, "window sieved");
        count += found;
        low = high + 1;
    }
    count
}

/// Number of windows the segmented path walks for `n`.
pub fn window_count(n: u64, window_span: u64) -> u64 {
    if n < 2 {
        return 0;
    }
    (n - n.isqrt()).div_ceil(window_span)
}

/// One numeric window `[low, high]` and its candidate bits.
struct Window<S: CandidateScheme> {
    low: u64,
    high: u64,
    /// Global scheme index of the first candidate `>= low`.
    first_index: u64,
    bits: PackedBits,
    _scheme: std::marker::PhantomData<S>,
}

impl<S: CandidateScheme> Window<S> {
    /// Requires `2 <= low <= high`.
    fn new(low: u64, high: u64) -> Self {
        debug_assert!(low >= 2 && low <= high);
        let first_index = S::candidate_count(low - 1);
        let len = S::candidate_count(high) - first_index;
        Window {
            low,
            high,
            first_index,
            bits: PackedBits::new_all_set(len as usize),
            _scheme: std::marker::PhantomData,
        }
    }

    /// Clear every candidate in the window that has a factor in `base`.
    fn mark(&mut self, base: &[u64]) {
        if self.bits.is_empty() {
            return;
        }
        for &p in base {
            if S::EXCLUDED.contains(&p) {
                continue;
            }
            let square = p * p;
            if square > self.high {
                break;
            }
            let stride = S::stride(p);
            let mut m = S::first_multiple(p, self.low.max(square));
            while m <= self.high {
                if S::is_candidate(m) {
                    self.bits
                        .clear((S::number_to_index(m) - self.first_index) as usize);
                }
                m += stride;
            }
        }
    }

    /// Emit survivors in ascending order and return how many there were.
    fn emit(self, sink: &mut dyn Sink) -> u64 {
        let mut found = 0;
        for local in self.bits.iter_set_bits() {
            let p = S::index_to_number(self.first_index + local as u64);
            if p > self.high {
                break;
            }
            sink.emit(p);
            found += 1;
        }
        found
    }
}
