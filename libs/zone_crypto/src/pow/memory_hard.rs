use serde::{Deserialize, Serialize};

use crate::{
    error::CryptoError,
    extra::ExtraHash,
    sponge::{keccak_state, state_to_bytes, KeccakF1600, Permutation},
    types::{HashDigest, KeccakState},
};

use super::PowFunction;

/// Lanes per scratchpad line (128 bytes).
pub const LINE_LANES: usize = 16;
const LINE_BYTES: usize = LINE_LANES * 8;
/// Lines folded into the state between two permutations.
const FOLD_GROUP: usize = 8;

/// Size and cost of the memory-hard backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScratchpadConfig {
    /// Scratchpad size in bytes. A power of two, at least one line.
    pub memory_size: usize,
    /// Number of read/multiply/write steps over the scratchpad.
    pub iterations: usize,
}

impl Default for ScratchpadConfig {
    fn default() -> Self {
        Self {
            memory_size: 1 << 21,
            iterations: 1 << 19,
        }
    }
}

impl ScratchpadConfig {
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.memory_size < LINE_BYTES || !self.memory_size.is_power_of_two() {
            return Err(CryptoError::InvalidScratchpadConfig(format!(
                "memory size must be a power of two of at least {LINE_BYTES} bytes, got {}",
                self.memory_size
            )));
        }
        if self.iterations == 0 {
            return Err(CryptoError::InvalidScratchpadConfig("iterations must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn lines(&self) -> usize {
        self.memory_size / LINE_BYTES
    }
}

/// Working memory of [`MemoryHardPow`].
#[derive(Debug)]
pub struct MemoryScratchpad {
    lines: Vec<[u64; LINE_LANES]>,
}

impl MemoryScratchpad {
    pub fn size_bytes(&self) -> usize {
        self.lines.len() * LINE_BYTES
    }
}

/// Scratchpad-bound proof of work.
///
/// The input's Keccak state seeds a scratchpad fill, a data-dependent walk
/// rewrites it, and the scratchpad is folded back into the state. One of the
/// extra hashes, chosen by the low bits of the first state byte, produces the
/// digest from the final 200-byte state.
#[derive(Debug, Clone, Copy)]
pub struct MemoryHardPow {
    config: ScratchpadConfig,
}

impl MemoryHardPow {
    pub fn new(config: ScratchpadConfig) -> Result<Self, CryptoError> {
        config.validate()?;
        Ok(MemoryHardPow { config })
    }

    pub fn config(&self) -> &ScratchpadConfig {
        &self.config
    }
}

impl PowFunction for MemoryHardPow {
    type Scratchpad = MemoryScratchpad;

    fn name(&self) -> &'static str {
        "memory-hard"
    }

    fn acquire_scratchpad(&self) -> Self::Scratchpad {
        tracing::debug!("allocating {} byte scratchpad", self.config.memory_size);
        MemoryScratchpad {
            lines: vec![[0; LINE_LANES]; self.config.lines()],
        }
    }

    fn hash(&self, scratchpad: &mut Self::Scratchpad, data: &[u8]) -> HashDigest {
        assert_eq!(
            scratchpad.lines.len(),
            self.config.lines(),
            "scratchpad was acquired for a different configuration"
        );
        let mut state = keccak_state(data);
        fill(&state, &mut scratchpad.lines);
        walk(&state, &mut scratchpad.lines, self.config.iterations);
        fold(&mut state, &scratchpad.lines);
        KeccakF1600::permute(&mut state);

        let bytes = state_to_bytes(&state);
        ExtraHash::from_state_byte(bytes[0]).hash(bytes)
    }
}

/// Overwrites every line, so earlier contents never leak into a digest.
fn fill(state: &KeccakState, lines: &mut [[u64; LINE_LANES]]) {
    let mut work = *state;
    for line in lines.iter_mut() {
        KeccakF1600::permute(&mut work);
        line.copy_from_slice(&work[..LINE_LANES]);
    }
}

fn walk(state: &KeccakState, lines: &mut [[u64; LINE_LANES]], iterations: usize) {
    // line count is a power of two
    let mask = lines.len() - 1;
    let mut a = state[0] ^ state[4];
    let mut b = state[1] ^ state[5];

    for _ in 0..iterations {
        let line = &mut lines[(a as usize) & mask];
        let word = ((a >> 32) as usize) % LINE_LANES;
        let c = line[word];
        let product = (c as u128) * (b as u128);
        let (hi, lo) = ((product >> 64) as u64, product as u64);

        line[word] = a.wrapping_add(hi);
        line[(word + 1) % LINE_LANES] ^= b.wrapping_add(lo);
        b = a;
        a = c ^ hi.rotate_left(23) ^ lo;
    }
}

fn fold(state: &mut KeccakState, lines: &[[u64; LINE_LANES]]) {
    let mut work = *state;
    for group in lines.chunks(FOLD_GROUP) {
        for line in group {
            for (lane, value) in work.iter_mut().zip(line.iter()) {
                *lane ^= value;
            }
        }
        KeccakF1600::permute(&mut work);
    }
    for (lane, value) in state.iter_mut().zip(work.iter()) {
        *lane ^= value;
    }
}
