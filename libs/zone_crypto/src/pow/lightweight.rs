use sha2::{Digest, Sha256};

use crate::types::HashDigest;

use super::PowFunction;

/// Single-pass SHA-256 proof of work.
///
/// There is no working memory: the scratchpad is `()` and acquire/release do
/// nothing, but callers still go through the same lifecycle as for any other
/// backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Pow;

impl PowFunction for Sha256Pow {
    type Scratchpad = ();

    fn name(&self) -> &'static str {
        "sha256"
    }

    fn acquire_scratchpad(&self) -> Self::Scratchpad {}

    fn hash(&self, _scratchpad: &mut Self::Scratchpad, data: &[u8]) -> HashDigest {
        Sha256::digest(data).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pow::ScratchpadGuard;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            hex::encode(Sha256Pow.pow_hash_once(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex::encode(Sha256Pow.pow_hash_once(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_lifecycle_reuse() {
        let inputs: Vec<Vec<u8>> = (0u32..5).map(|nonce| [b"header".as_slice(), &nonce.to_le_bytes()[..]].concat()).collect();
        let mut guard = ScratchpadGuard::acquire(&Sha256Pow);
        let reused: Vec<HashDigest> = inputs.iter().map(|input| guard.hash(input)).collect();
        guard.release();

        for (input, digest) in inputs.iter().zip(&reused) {
            assert_eq!(&Sha256Pow.pow_hash_once(input), digest);
        }
        assert_ne!(reused[0], reused[1]);
    }
}
