//! Common type aliases used across cryptographic components.

/// Length of every digest produced by this crate (32 bytes).
pub const HASH_SIZE: usize = 32;
/// Sponge rate: bytes absorbed per permutation call.
pub const HASH_DATA_AREA: usize = 136;
/// Number of 64-bit lanes in the Keccak-f[1600] state.
pub const STATE_LANES: usize = 25;

/// Fixed-size 32-byte digest.
pub type HashDigest = [u8; HASH_SIZE];
/// Full permutation state, 200 bytes as little-endian lanes.
pub type KeccakState = [u64; STATE_LANES];
