//! Salted hash family: k pseudo-independent functions from one digest.
//!
//! Function `h_i` hashes an element `e` as
//!
//! ```text
//! salt_i = Digest(be_u32(i))
//! h_i(e) = |be_i32(Digest(salt_i ++ serialize(e))[0..4])|
//! ```
//!
//! with `i32::MIN` folded to 0 so every value lies in `[0, 2^31)`.
//! Each function owns a digest context pre-fed with `salt_i` and hashes on a
//! clone of it, so functions carry no mutable state and need no locking.
use std::fmt::{self, Display};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ALGORITHM, DEFAULT_FUNCTION_COUNT, HASH_PREFIX_BYTES, SALT_BYTES};
use crate::digest::{DigestAlgorithm, SeededDigest};
use crate::errors::{FilterError, Result};
use crate::serializer::{DisplaySerializer, ElementSerializer};

/// Maps an element to a value in `[0, 2^31)`.
pub trait HashFunction<E: ?Sized>: Send + Sync {
    fn hash(&self, element: &E) -> Result<u32>;
}

/// Reads a digest prefix as a big-endian `i32` and takes its absolute
/// value. `i32::MIN` has no positive counterpart and maps to 0.
pub fn non_negative_prefix(prefix: &[u8; HASH_PREFIX_BYTES]) -> u32 {
    let v = BigEndian::read_i32(prefix);
    v.checked_abs().map_or(0, |a| a as u32)
}

pub fn salt_bytes(salt: u32) -> [u8; SALT_BYTES] {
    salt.to_be_bytes()
}

pub struct SaltedHash<E: ?Sized> {
    salt: u32,
    seeded: SeededDigest,
    serializer: Arc<dyn ElementSerializer<E>>,
}

impl<E: ?Sized> SaltedHash<E> {
    pub fn new(
        algorithm: DigestAlgorithm,
        salt: u32,
        serializer: Arc<dyn ElementSerializer<E>>,
    ) -> Self {
        let salt_digest = algorithm.digest(&salt_bytes(salt));
        Self {
            salt,
            seeded: algorithm.seeded(&salt_digest),
            serializer,
        }
    }

    pub fn salt(&self) -> u32 {
        self.salt
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.seeded.algorithm()
    }
}

impl<E: ?Sized> HashFunction<E> for SaltedHash<E> {
    fn hash(&self, element: &E) -> Result<u32> {
        let bytes = self.serializer.serialize(element)?;
        Ok(non_negative_prefix(&self.seeded.digest_prefix(&bytes)))
    }
}

impl<E: ?Sized> Clone for SaltedHash<E> {
    fn clone(&self) -> Self {
        Self {
            salt: self.salt,
            seeded: self.seeded.clone(),
            serializer: Arc::clone(&self.serializer),
        }
    }
}

impl<E: ?Sized> fmt::Debug for SaltedHash<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedHash")
            .field("salt", &self.salt)
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

/// Parameters of a hash family. Loadable from JSON; missing fields take
/// the defaults (`"MD5"`, 10 functions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashFamilyConfig {
    pub algorithm: String,
    pub function_count: usize,
}

impl Default for HashFamilyConfig {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            function_count: DEFAULT_FUNCTION_COUNT,
        }
    }
}

impl HashFamilyConfig {
    pub fn algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm = name.into();
        self
    }

    pub fn function_count(mut self, k: usize) -> Self {
        self.function_count = k;
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(HashFamilyOverrides::load(path)?.apply(Self::default()))
    }

    /// Parses and checks the parameters without building anything.
    pub fn validate(&self) -> Result<DigestAlgorithm> {
        let algorithm: DigestAlgorithm = self.algorithm.parse()?;
        if self.function_count == 0 {
            return Err(FilterError::InvalidConfig("function_count must be positive"));
        }
        if u32::try_from(self.function_count).is_err() {
            return Err(FilterError::InvalidConfig("function_count exceeds u32 salt range"));
        }
        Ok(algorithm)
    }
}

/// A partially specified [`HashFamilyConfig`], as read from a config file.
/// Fields left out stay `None`, so callers can tell a default from a value
/// the file actually set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashFamilyOverrides {
    pub algorithm: Option<String>,
    pub function_count: Option<usize>,
}

impl HashFamilyOverrides {
    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let overrides: HashFamilyOverrides = serde_json::from_str(&s)?;
        Ok(overrides)
    }

    /// Fields set in `later` replace those set in `self`.
    pub fn merge(self, later: HashFamilyOverrides) -> Self {
        Self {
            algorithm: later.algorithm.or(self.algorithm),
            function_count: later.function_count.or(self.function_count),
        }
    }

    /// Fields set here replace those of `base`.
    pub fn apply(self, mut base: HashFamilyConfig) -> HashFamilyConfig {
        if let Some(a) = self.algorithm {
            base.algorithm = a;
        }
        if let Some(k) = self.function_count {
            base.function_count = k;
        }
        base
    }
}

/// Ordered, immutable set of salted hash functions, salts `0..k`.
pub struct HashFamily<E: ?Sized> {
    algorithm: DigestAlgorithm,
    functions: Vec<SaltedHash<E>>,
}

impl<E: ?Sized> HashFamily<E> {
    pub fn build<S>(config: &HashFamilyConfig, serializer: S) -> Result<Self>
    where
        S: ElementSerializer<E> + 'static,
    {
        Self::build_shared(config, Arc::new(serializer))
    }

    pub fn build_shared(
        config: &HashFamilyConfig,
        serializer: Arc<dyn ElementSerializer<E>>,
    ) -> Result<Self> {
        let algorithm = config.validate()?;
        // validate() bounds function_count by u32::MAX
        let functions = (0..config.function_count as u32)
            .map(|salt| SaltedHash::new(algorithm, salt, Arc::clone(&serializer)))
            .collect::<Vec<_>>();
        tracing::debug!(
            algorithm = %algorithm,
            functions = functions.len(),
            "hash family built"
        );
        Ok(Self { algorithm, functions })
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn functions(&self) -> &[SaltedHash<E>] {
        &self.functions
    }

    pub fn into_functions(self) -> Vec<SaltedHash<E>> {
        self.functions
    }

    /// All k hash values of `element`, in salt order.
    pub fn hash_all(&self, element: &E) -> Result<Vec<u32>> {
        self.functions.iter().map(|h| h.hash(element)).collect()
    }
}

impl<E: Display + ?Sized> HashFamily<E> {
    /// Family using the element's text form as its bytes.
    pub fn with_display(config: &HashFamilyConfig) -> Result<Self> {
        Self::build(config, DisplaySerializer)
    }
}

impl<E: ?Sized> Clone for HashFamily<E> {
    fn clone(&self) -> Self {
        Self {
            algorithm: self.algorithm,
            functions: self.functions.clone(),
        }
    }
}

impl<E: ?Sized> fmt::Debug for HashFamily<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashFamily")
            .field("algorithm", &self.algorithm)
            .field("functions", &self.functions.len())
            .finish()
    }
}
