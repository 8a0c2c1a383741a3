//! Proof-of-work hash functions.
//!
//! A [`PowFunction`] splits hashing into an explicit lifecycle: acquire a
//! scratchpad once per worker, hash any number of inputs against it, release
//! it exactly once. [`ScratchpadGuard`] ties the release to scope so every exit
//! path releases. Digests never depend on what an earlier call left in the
//! scratchpad.

mod lightweight;
mod memory_hard;

pub use lightweight::Sha256Pow;
pub use memory_hard::{MemoryHardPow, MemoryScratchpad, ScratchpadConfig};

use crate::types::HashDigest;

/// A proof-of-work hash with a reusable working buffer.
pub trait PowFunction {
    /// Per-worker working memory. One instance must never be shared by two
    /// computations at once.
    type Scratchpad;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Reserve the working memory. May be expensive.
    fn acquire_scratchpad(&self) -> Self::Scratchpad;

    /// Hash `data` using `scratchpad` as working memory.
    fn hash(&self, scratchpad: &mut Self::Scratchpad, data: &[u8]) -> HashDigest;

    /// Return the working memory. Takes the scratchpad by value, so it cannot
    /// be released twice.
    fn release_scratchpad(&self, scratchpad: Self::Scratchpad) {
        drop(scratchpad);
    }

    /// Acquire, hash once, release.
    fn pow_hash_once(&self, data: impl AsRef<[u8]>) -> HashDigest
    where
        Self: Sized,
    {
        let mut guard = ScratchpadGuard::acquire(self);
        guard.hash(data)
    }
}

/// Scoped ownership of one scratchpad.
///
/// Hashing takes `&mut self`, so a guard is used by one computation at a
/// time; concurrent workers each hold their own guard.
pub struct ScratchpadGuard<'a, F: PowFunction> {
    function: &'a F,
    scratchpad: Option<F::Scratchpad>,
    hashes: u64,
}

impl<'a, F: PowFunction> ScratchpadGuard<'a, F> {
    pub fn acquire(function: &'a F) -> Self {
        tracing::debug!("acquiring {} scratchpad", function.name());
        ScratchpadGuard {
            function,
            scratchpad: Some(function.acquire_scratchpad()),
            hashes: 0,
        }
    }

    pub fn hash(&mut self, data: impl AsRef<[u8]>) -> HashDigest {
        let Some(scratchpad) = self.scratchpad.as_mut() else {
            unreachable!("scratchpad is only taken when the guard is consumed");
        };
        self.hashes += 1;
        self.function.hash(scratchpad, data.as_ref())
    }

    /// Number of hashes computed with this scratchpad.
    pub fn hashes(&self) -> u64 {
        self.hashes
    }

    /// Release now instead of at the end of scope.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(scratchpad) = self.scratchpad.take() {
            tracing::debug!("releasing {} scratchpad after {} hashes", self.function.name(), self.hashes);
            self.function.release_scratchpad(scratchpad);
        }
    }
}

impl<F: PowFunction> Drop for ScratchpadGuard<'_, F> {
    fn drop(&mut self) {
        self.release_inner();
    }
}


#[cfg(test)]
mod tests {
    use std::{cell::Cell, panic::{catch_unwind, AssertUnwindSafe}};

    use super::*;
    use crate::sponge::hash_bytes;

    /// Counts lifecycle calls around the fast hash.
    #[derive(Default)]
    struct CountingPow {
        acquired: Cell<usize>,
        released: Cell<usize>,
    }

    impl PowFunction for CountingPow {
        type Scratchpad = Vec<u8>;

        fn name(&self) -> &'static str {
            "counting"
        }

        fn acquire_scratchpad(&self) -> Self::Scratchpad {
            self.acquired.set(self.acquired.get() + 1);
            vec![0u8; 64]
        }

        fn hash(&self, scratchpad: &mut Self::Scratchpad, data: &[u8]) -> HashDigest {
            scratchpad.fill(data.first().copied().unwrap_or(0));
            hash_bytes(data)
        }

        fn release_scratchpad(&self, _scratchpad: Self::Scratchpad) {
            self.released.set(self.released.get() + 1);
        }
    }

    #[test]
    fn test_guard_releases_once_on_drop() {
        let pow = CountingPow::default();
        {
            let mut guard = ScratchpadGuard::acquire(&pow);
            guard.hash(b"a");
            guard.hash(b"b");
            assert_eq!(guard.hashes(), 2);
        }
        assert_eq!(pow.acquired.get(), 1);
        assert_eq!(pow.released.get(), 1);
    }

    #[test]
    fn test_explicit_release() {
        let pow = CountingPow::default();
        let mut guard = ScratchpadGuard::acquire(&pow);
        guard.hash(b"a");
        guard.release();
        assert_eq!(pow.released.get(), 1);
    }

    #[test]
    fn test_release_on_panic() {
        let pow = CountingPow::default();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut guard = ScratchpadGuard::acquire(&pow);
            guard.hash(b"a");
            panic!("worker failed");
        }));
        assert!(result.is_err());
        assert_eq!(pow.acquired.get(), 1);
        assert_eq!(pow.released.get(), 1);
    }

    #[test]
    fn test_once_matches_reused() {
        let pow = CountingPow::default();
        let mut guard = ScratchpadGuard::acquire(&pow);
        let reused: Vec<HashDigest> = [b"x", b"y", b"z"].iter().map(|d| guard.hash(d)).collect();
        drop(guard);
        for (data, digest) in [b"x", b"y", b"z"].iter().zip(reused) {
            assert_eq!(pow.pow_hash_once(data), digest);
        }
        assert_eq!(pow.acquired.get(), 4);
        assert_eq!(pow.released.get(), 4);
    }
}
