//! Bloom-style membership filter over a salted hash family.
//!
//! `insert` sets bit `h_i(e) mod m` for every function; `contains` reports
//! true only if all of those bits are set. Inserted elements are therefore
//! never reported missing, while elements never inserted may be reported
//! present at a rate estimated by [`MembershipFilter::false_positive_probability`].
//!
//! Both operations take `&self`: bits are set with atomic `fetch_or` and the
//! insert counter is atomic, so a filter can be shared across threads.
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bits::BitArray;
use crate::errors::{FilterError, Result};
use crate::hash_family::{HashFamily, HashFunction, SaltedHash};

pub struct MembershipFilter<E: ?Sized, H = SaltedHash<E>> {
    bits: BitArray,
    hash_functions: Vec<H>,
    inserted: AtomicU64,
    _element: PhantomData<fn(&E)>,
}

impl<E: ?Sized> MembershipFilter<E> {
    pub fn with_family(bits_amount: usize, family: HashFamily<E>) -> Result<Self> {
        Self::new(bits_amount, family.into_functions())
    }
}

impl<E: ?Sized, H: HashFunction<E>> MembershipFilter<E, H> {
    pub fn new(bits_amount: usize, hash_functions: Vec<H>) -> Result<Self> {
        if bits_amount == 0 {
            return Err(FilterError::InvalidConfig("bits_amount must be positive"));
        }
        if hash_functions.is_empty() {
            return Err(FilterError::InvalidConfig("at least one hash function is required"));
        }
        tracing::debug!(
            bits = bits_amount,
            hashes = hash_functions.len(),
            "membership filter created"
        );
        Ok(Self {
            bits: BitArray::new(bits_amount),
            hash_functions,
            inserted: AtomicU64::new(0),
            _element: PhantomData,
        })
    }

    #[inline]
    fn bit_index(&self, h: &H, element: &E) -> Result<usize> {
        let v = h.hash(element)?;
        Ok(v as usize % self.bits.len())
    }

    /// Adds `element`. Every index is computed before any bit is touched, so
    /// a serializer failure leaves the filter unchanged.
    pub fn insert(&self, element: &E) -> Result<()> {
        let idxs = self
            .hash_functions
            .iter()
            .map(|h| self.bit_index(h, element))
            .collect::<Result<Vec<_>>>()?;
        let mut fresh = 0usize;
        for idx in idxs {
            if self.bits.set(idx) {
                fresh += 1;
            }
        }
        let n = self.inserted.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(inserted = n, fresh_bits = fresh, "element inserted");
        Ok(())
    }

    /// Inserts every element, stopping at the first failure.
    pub fn insert_all<'a, I>(&self, elements: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        for e in elements {
            self.insert(e)?;
        }
        Ok(())
    }

    /// `false` means definitely never inserted; `true` means possibly inserted.
    pub fn contains(&self, element: &E) -> Result<bool> {
        for h in &self.hash_functions {
            if !self.bits.get(self.bit_index(h, element)?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// `(1 - e^(-k*n/m))^k` for the current insert count `n`.
    pub fn false_positive_probability(&self) -> f64 {
        let k = self.hash_functions.len() as f64;
        let n = self.inserted_count() as f64;
        let m = self.bits.len() as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// m
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// k
    pub fn hash_count(&self) -> usize {
        self.hash_functions.len()
    }

    /// Number of `insert` calls that succeeded, duplicates included.
    pub fn inserted_count(&self) -> u64 {
        self.inserted.load(Ordering::Relaxed)
    }

    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn fill_ratio(&self) -> f64 {
        self.bits_set() as f64 / self.bits.len() as f64
    }

    pub fn bits(&self) -> &BitArray {
        &self.bits
    }

    pub fn hash_functions(&self) -> &[H] {
        &self.hash_functions
    }
}

impl<E: ?Sized, H> fmt::Debug for MembershipFilter<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipFilter")
            .field("bits", &self.bits)
            .field("hashes", &self.hash_functions.len())
            .field("inserted", &self.inserted.load(Ordering::Relaxed))
            .finish()
    }
}
