//! Digest algorithms backing a hash family.
//!
//! Every algorithm is usable in two ways: a one-shot [`DigestAlgorithm::digest`]
//! and a [`SeededDigest`], a context that has already absorbed a seed and is
//! cloned for each input. The seeded context is never written after
//! construction, so one instance can serve any number of threads.
use std::fmt;
use std::str::FromStr;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::consts::HASH_PREFIX_BYTES;
use crate::errors::{FilterError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Blake3,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 7] = [
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
        DigestAlgorithm::Blake3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha224 => "SHA-224",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
            DigestAlgorithm::Blake3 => "BLAKE3",
        }
    }

    /// Digest size in bytes.
    pub fn output_len(self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha224 => 28,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
            DigestAlgorithm::Blake3 => blake3::OUT_LEN,
        }
    }

    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        self.seeded(&[]).digest(data)
    }

    /// Context that has absorbed `seed`; see [`SeededDigest::digest`].
    pub fn seeded(self, seed: &[u8]) -> SeededDigest {
        let engine = match self {
            DigestAlgorithm::Md5 => Engine::Md5(absorb(seed)),
            DigestAlgorithm::Sha1 => Engine::Sha1(absorb(seed)),
            DigestAlgorithm::Sha224 => Engine::Sha224(absorb(seed)),
            DigestAlgorithm::Sha256 => Engine::Sha256(absorb(seed)),
            DigestAlgorithm::Sha384 => Engine::Sha384(absorb(seed)),
            DigestAlgorithm::Sha512 => Engine::Sha512(absorb(seed)),
            DigestAlgorithm::Blake3 => {
                let mut h = blake3::Hasher::new();
                h.update(seed);
                Engine::Blake3(Box::new(h))
            }
        };
        SeededDigest { algorithm: self, engine }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().to_ascii_uppercase();
        let alg = match norm.as_str() {
            "MD5" => DigestAlgorithm::Md5,
            "SHA" | "SHA1" | "SHA-1" => DigestAlgorithm::Sha1,
            "SHA224" | "SHA-224" => DigestAlgorithm::Sha224,
            "SHA256" | "SHA-256" => DigestAlgorithm::Sha256,
            "SHA384" | "SHA-384" => DigestAlgorithm::Sha384,
            "SHA512" | "SHA-512" => DigestAlgorithm::Sha512,
            "BLAKE3" => DigestAlgorithm::Blake3,
            _ => return Err(FilterError::UnknownAlgorithm(s.to_string())),
        };
        Ok(alg)
    }
}

#[derive(Clone)]
enum Engine {
    Md5(Md5),
    Sha1(Sha1),
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    Blake3(Box<blake3::Hasher>),
}

fn absorb<D: Digest>(seed: &[u8]) -> D {
    let mut d = D::new();
    d.update(seed);
    d
}

fn finish<D: Digest + Clone>(seeded: &D, data: &[u8]) -> Vec<u8> {
    let mut d = seeded.clone();
    d.update(data);
    d.finalize().to_vec()
}

/// Digest context pre-fed with a seed.
#[derive(Clone)]
pub struct SeededDigest {
    algorithm: DigestAlgorithm,
    engine: Engine,
}

impl SeededDigest {
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// `Digest(seed ++ data)`, computed on a private copy of the context.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match &self.engine {
            Engine::Md5(d) => finish(d, data),
            Engine::Sha1(d) => finish(d, data),
            Engine::Sha224(d) => finish(d, data),
            Engine::Sha256(d) => finish(d, data),
            Engine::Sha384(d) => finish(d, data),
            Engine::Sha512(d) => finish(d, data),
            Engine::Blake3(h) => {
                let mut h = h.as_ref().clone();
                h.update(data);
                h.finalize().as_bytes().to_vec()
            }
        }
    }

    /// Leading bytes of [`digest`](Self::digest). Every supported digest is at
    /// least 16 bytes long.
    pub fn digest_prefix(&self, data: &[u8]) -> [u8; HASH_PREFIX_BYTES] {
        let d = self.digest(data);
        let mut out = [0u8; HASH_PREFIX_BYTES];
        out.copy_from_slice(&d[..HASH_PREFIX_BYTES]);
        out
    }
}

impl fmt::Debug for SeededDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededDigest")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
