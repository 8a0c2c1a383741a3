//! Hashing traits and the default sponge-backed implementation.
//!
//! The `Hashable` trait abstracts how a type contributes bytes to a hash
//! function. The `HashFunction` trait exposes a minimal update/digest API
//! to keep implementations simple and easily swappable in tests.

use crate::{sponge::SpongeState, types::HashDigest};


/// A trait for objects that can be hashed using a hash function.
///
/// Implementors should call `hasher.update(...)` for each field to include
/// and then return `hasher.digest()`.
pub trait Hashable {
    /// Computes the hash of the object using the provided hash function.
    ///
    /// # Arguments
    ///
    /// * `hasher` - A mutable instance of a type implementing the `HashFunction` trait.
    fn hash(&self, hasher: &mut impl HashFunction) -> HashDigest;
}

/// A trait for hash functions that support updating with data and producing a digest.
pub trait HashFunction {
    /// Updates the hash function with the given data.
    ///
    /// # Arguments
    ///
    /// * `data` - The data to be hashed.
    fn update(&mut self, data: impl AsRef<[u8]>);

    /// Finalizes the hash computation, returns the digest and resets the
    /// hasher so it can be used for the next message.
    fn digest(&mut self) -> HashDigest;
}

/// The Keccak fast hash as a `HashFunction`.
///
/// Each `digest` finalizes the current sponge and starts a fresh one. A
/// digest without any prior `update` is the empty-message digest.
#[derive(Debug, Clone, Default)]
pub struct FastHash {
    state: SpongeState,
}

impl FastHash {
    pub fn new() -> Self {
        FastHash {
            state: SpongeState::new(),
        }
    }
}

impl HashFunction for FastHash {
    fn update(&mut self, data: impl AsRef<[u8]>) {
        self.state.process(data);
    }

    fn digest(&mut self) -> HashDigest {
        std::mem::take(&mut self.state).finalize()
    }
}


mod implementations {
    use crate::{hashing::Hashable, types::HashDigest};

    impl Hashable for Vec<u8> {
        fn hash(&self, hasher: &mut impl super::HashFunction) -> HashDigest {
            hasher.update(self.as_slice());
            hasher.digest()
        }
    }

    impl Hashable for [u8] {
        fn hash(&self, hasher: &mut impl super::HashFunction) -> HashDigest {
            hasher.update(self);
            hasher.digest()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sponge::hash_bytes;

    #[test]
    fn test_update_concatenates() {
        let mut hasher = FastHash::new();
        hasher.update(b"zone");
        hasher.update(b" ");
        hasher.update(b"network");
        assert_eq!(hasher.digest(), hash_bytes(b"zone network"));
    }

    #[test]
    fn test_digest_resets() {
        let mut hasher = FastHash::new();
        hasher.update(b"first");
        let first = hasher.digest();
        hasher.update(b"first");
        assert_eq!(hasher.digest(), first);
        // nothing absorbed since the last digest
        assert_eq!(hasher.digest(), hash_bytes(b""));
    }

    #[test]
    fn test_hashable_implementations_agree() {
        let mut hasher = FastHash::new();
        let blob = b"coinbase".to_vec();
        let expected = hash_bytes(&blob);
        assert_eq!(blob.hash(&mut hasher), expected);
        assert_eq!(blob.as_slice().hash(&mut hasher), expected);
        // the hasher is reset between calls
        assert_eq!(Vec::<u8>::new().hash(&mut hasher), hash_bytes(b""));
    }
}
