//! Cryptographic hashing primitives used by the Zone network.
//!
//! This crate provides small, focused building blocks:
//! - A Keccak sponge engine (the "fast hash") and the hashing traits built on it
//! - Tree hashing of block digests into a single root, with inclusion branches
//! - A dispatcher over the four "extra" hash algorithms
//! - Proof-of-work hash functions with an explicit scratchpad lifecycle
//! - Fixed-size digest types used across the project
//!
//! None of the public APIs in this crate perform network or filesystem I/O.

/// Keccak sponge engine with an explicit absorb/finalize state machine.
pub mod sponge;
/// Reusable hashing traits and the sponge-backed default hasher.
pub mod hashing;
/// Tree hash reduction of ordered leaf digests.
pub mod tree;
/// Inclusion branches for tree hashes.
pub mod proofs;
/// Selection among the BLAKE-256, Groestl-256, JH-256 and Skein-512-256 backends.
pub mod extra;
/// Proof-of-work hash functions and scratchpad lifecycle.
pub mod pow;
/// Common type aliases and constants used by this crate.
pub mod types;

pub mod error;
