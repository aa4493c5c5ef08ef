//! # Bitset — Packed Prime Flags
//!
//! One bit per candidate, packed into `u64` words. A set bit means the
//! candidate is still possibly prime; sieving only ever clears bits.
//!
//! Bit `i` lives in word `i / 64` at position `i % 64`. Padding bits past
//! `len` in the last word are kept clear so word-level popcount and the
//! set-bit iterator never report phantom survivors.

/// Fixed-size packed bit array, created all-set and monotonically cleared.
///
/// 8× smaller than `Vec<bool>`: a 262 144-number window in the odd layout is
/// 131 072 bits, 16 KiB, which stays resident in L1/L2 during marking.
pub struct PackedBits {
    words: Vec<u64>,
    len: usize,
}

impl PackedBits {
    /// Create `len` bits, all set (every candidate presumed prime).
    pub fn new_all_set(len: usize) -> Self {
        let num_words = len.div_ceil(64);
        let mut words = vec![u64::MAX; num_words];
        let extra = num_words * 64 - len;
        if extra > 0 {
            words[num_words - 1] >>= extra;
        }
        PackedBits { words, len }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether bit `index` is still set.
    ///
    /// # Panics
    /// Panics if `index >= len`. Engines never produce such an index.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "PackedBits index out of bounds: {} >= {}",
            index,
            self.len
        );
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Clear bit `index` (candidate proven composite). Idempotent.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn clear(&mut self, index: usize) {
        assert!(
            index < self.len,
            "PackedBits index out of bounds: {} >= {}",
            index,
            self.len
        );
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    #[cfg(test)]
    fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of all set bits in ascending order.
    pub fn iter_set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| BitIter {
            word,
            base: wi * 64,
        })
    }
}

/// Set bits of one word, lowest first.
struct BitIter {
    word: u64,
    base: usize,
}

impl Iterator for BitIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let tz = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1;
        Some(self.base + tz)
    }
}
