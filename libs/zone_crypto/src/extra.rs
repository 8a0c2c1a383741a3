//! The four "extra" hash algorithms and the dispatcher that selects them.
//!
//! Each backend is an existing implementation wrapped behind [`HashBackend`].
//! [`ExtraHash`] is the closed set of identifiers; routing holds no state.

use std::{fmt::Display, str::FromStr};

use digest::{consts::U32, Digest};
use groestl::Groestl256;
use jh::Jh256;
use skein::Skein512;

use crate::{error::CryptoError, types::HashDigest};

/// A fixed-output hash algorithm.
pub trait HashBackend {
    /// Hashes `data` into a 32-byte digest.
    fn hash(data: &[u8]) -> HashDigest;
}

fn to_digest(bytes: &[u8]) -> HashDigest {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(bytes);
    digest
}

/// BLAKE-256 (SHA-3 finalist, 14 rounds).
pub struct Blake256;

impl HashBackend for Blake256 {
    fn hash(data: &[u8]) -> HashDigest {
        to_digest(&<blake_hash::Blake256 as blake_hash::Digest>::digest(data))
    }
}

/// Groestl-256.
pub struct Groestl;

impl HashBackend for Groestl {
    fn hash(data: &[u8]) -> HashDigest {
        to_digest(&<Groestl256 as Digest>::digest(data))
    }
}

/// JH-256.
pub struct Jh;

impl HashBackend for Jh {
    fn hash(data: &[u8]) -> HashDigest {
        to_digest(&<Jh256 as Digest>::digest(data))
    }
}

/// Skein-512 with a 256-bit output.
pub struct Skein;

impl HashBackend for Skein {
    fn hash(data: &[u8]) -> HashDigest {
        to_digest(&<Skein512<U32> as Digest>::digest(data))
    }
}

/// Identifier of one of the extra hash backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraHash {
    Blake = 0,
    Groestl = 1,
    Jh = 2,
    Skein = 3,
}

impl ExtraHash {
    pub const ALL: [ExtraHash; 4] = [ExtraHash::Blake, ExtraHash::Groestl, ExtraHash::Jh, ExtraHash::Skein];

    /// Identifier at `index` in [`ExtraHash::ALL`].
    ///
    /// # Panics
    ///
    /// If `index` is not in `0..4`. Callers only ever hold indices from the
    /// closed set, so anything else is a bug at the call site.
    pub fn from_index(index: usize) -> Self {
        assert!(index < Self::ALL.len(), "extra hash index {index} is outside the closed set");
        Self::ALL[index]
    }

    /// Selects by the low two bits of a state byte.
    pub fn from_state_byte(byte: u8) -> Self {
        Self::ALL[(byte & 3) as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ExtraHash::Blake => "blake",
            ExtraHash::Groestl => "groestl",
            ExtraHash::Jh => "jh",
            ExtraHash::Skein => "skein",
        }
    }

    pub fn hash(self, data: impl AsRef<[u8]>) -> HashDigest {
        let data = data.as_ref();
        match self {
            ExtraHash::Blake => Blake256::hash(data),
            ExtraHash::Groestl => Groestl::hash(data),
            ExtraHash::Jh => Jh::hash(data),
            ExtraHash::Skein => Skein::hash(data),
        }
    }
}

impl Display for ExtraHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExtraHash {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == name)
            .ok_or_else(|| CryptoError::UnknownAlgorithm(s.to_string()))
    }
}

/// Hash `data` with the selected backend.
pub fn hash_extra(algorithm: ExtraHash, data: impl AsRef<[u8]>) -> HashDigest {
    algorithm.hash(data)
}
