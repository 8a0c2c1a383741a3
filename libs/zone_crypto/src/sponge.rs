//! Keccak sponge engine.
//!
//! A [`SpongeState`] absorbs input in [`HASH_DATA_AREA`]-byte blocks through a
//! [`Permutation`] and is consumed by finalization. The default permutation is
//! Keccak-f[1600] with the original Keccak padding, which makes
//! [`hash_bytes`] the Keccak-256 "fast hash".

use std::marker::PhantomData;

use crate::types::{HashDigest, KeccakState, HASH_DATA_AREA, HASH_SIZE, STATE_LANES};

/// The permutation primitive driven by the sponge.
pub trait Permutation {
    /// Permutes the full state in place.
    fn permute(state: &mut KeccakState);
}

/// Keccak-f[1600], 24 rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeccakF1600;

impl Permutation for KeccakF1600 {
    fn permute(state: &mut KeccakState) {
        keccak::f1600(state);
    }
}

/// Running state of one hash computation.
///
/// `process` may be called any number of times; `finalize` takes the state by
/// value so a finished computation cannot absorb more input.
#[derive(Debug, Clone)]
pub struct SpongeState<P: Permutation = KeccakF1600> {
    lanes: KeccakState,
    staging: [u8; HASH_DATA_AREA],
    /// Bytes currently held in `staging`, always `< HASH_DATA_AREA`.
    staged: usize,
    _permutation: PhantomData<P>,
}

impl Default for SpongeState<KeccakF1600> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Permutation> SpongeState<P> {
    pub fn new() -> Self {
        SpongeState {
            lanes: [0; STATE_LANES],
            staging: [0; HASH_DATA_AREA],
            staged: 0,
            _permutation: PhantomData,
        }
    }

    /// Absorbs `data`, permuting once per full block. A trailing partial block
    /// stays staged for the next call.
    pub fn process(&mut self, data: impl AsRef<[u8]>) {
        let mut data = data.as_ref();

        if self.staged > 0 {
            let take = (HASH_DATA_AREA - self.staged).min(data.len());
            self.staging[self.staged..self.staged + take].copy_from_slice(&data[..take]);
            self.staged += take;
            data = &data[take..];
            if self.staged < HASH_DATA_AREA {
                return;
            }
            absorb_block::<P>(&mut self.lanes, &self.staging);
            self.staged = 0;
        }

        let mut blocks = data.chunks_exact(HASH_DATA_AREA);
        for block in &mut blocks {
            absorb_block::<P>(&mut self.lanes, block);
        }
        let rest = blocks.remainder();
        self.staging[..rest.len()].copy_from_slice(rest);
        self.staged = rest.len();
    }

    /// Number of bytes waiting in the staging buffer.
    pub fn staged_len(&self) -> usize {
        self.staged
    }

    /// Pads the staged remainder, permutes and returns the full state.
    pub fn finalize_state(mut self) -> KeccakState {
        self.staging[self.staged..].fill(0);
        self.staging[self.staged] ^= 0x01;
        self.staging[HASH_DATA_AREA - 1] ^= 0x80;
        absorb_block::<P>(&mut self.lanes, &self.staging);
        self.lanes
    }

    /// Pads, permutes and extracts the digest.
    pub fn finalize(self) -> HashDigest {
        digest_from_state(&self.finalize_state())
    }
}

fn absorb_block<P: Permutation>(lanes: &mut KeccakState, block: &[u8]) {
    for (lane, word) in lanes.iter_mut().zip(block.chunks_exact(8)) {
        *lane ^= read_lane(word);
    }
    P::permute(lanes);
}

fn read_lane(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(bytes);
    u64::from_le_bytes(word)
}

/// Leading [`HASH_SIZE`] bytes of a state.
pub fn digest_from_state(state: &KeccakState) -> HashDigest {
    let mut digest = [0u8; HASH_SIZE];
    for (chunk, lane) in digest.chunks_exact_mut(8).zip(state.iter()) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
    digest
}

/// The 200 state bytes in little-endian lane order.
pub fn state_to_bytes(state: &KeccakState) -> [u8; STATE_LANES * 8] {
    let mut bytes = [0u8; STATE_LANES * 8];
    for (chunk, lane) in bytes.chunks_exact_mut(8).zip(state.iter()) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
    bytes
}

/// One-shot fast hash of `data`.
pub fn hash_bytes(data: impl AsRef<[u8]>) -> HashDigest {
    let mut state = SpongeState::<KeccakF1600>::new();
    state.process(data);
    state.finalize()
}

/// One-shot full Keccak state of `data`.
pub fn keccak_state(data: impl AsRef<[u8]>) -> KeccakState {
    let mut state = SpongeState::<KeccakF1600>::new();
    state.process(data);
    state.finalize_state()
}
