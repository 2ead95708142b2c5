//! Fixed-length bit array with set-only, lock-free writes.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::consts::WORD_BITS;

/// `len` bits packed into `u64` words. Bits only ever go 0 -> 1; `set` is an
/// idempotent `fetch_or`, so concurrent writers need no ordering between them.
pub struct BitArray {
    words: Box<[AtomicU64]>,
    len: usize,
}

impl BitArray {
    pub fn new(len: usize) -> Self {
        let words = (0..len.div_ceil(WORD_BITS))
            .map(|_| AtomicU64::new(0))
            .collect();
        Self { words, len }
    }

    #[inline]
    fn locate(&self, idx: usize) -> (usize, u64) {
        assert!(idx < self.len, "bit index {idx} out of range {}", self.len);
        (idx / WORD_BITS, 1u64 << (idx % WORD_BITS))
    }

    /// Sets bit `idx`; returns true if it was previously clear.
    #[inline]
    pub fn set(&self, idx: usize) -> bool {
        let (w, mask) = self.locate(idx);
        self.words[w].fetch_or(mask, Ordering::Relaxed) & mask == 0
    }

    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        let (w, mask) = self.locate(idx);
        self.words[w].load(Ordering::Relaxed) & mask != 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    /// Point-in-time copy of the backing words.
    pub fn snapshot(&self) -> Vec<u64> {
        self.words.iter().map(|w| w.load(Ordering::Relaxed)).collect()
    }
}

impl Clone for BitArray {
    fn clone(&self) -> Self {
        let words = self.snapshot().into_iter().map(AtomicU64::new).collect();
        Self { words, len: self.len }
    }
}

impl PartialEq for BitArray {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.snapshot() == other.snapshot()
    }
}

impl Eq for BitArray {}

impl fmt::Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitArray")
            .field("len", &self.len)
            .field("ones", &self.count_ones())
            .finish()
    }
}
