use thiserror::Error;

/// Errors surfaced by the hashing primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A tree hash was requested over zero leaves.
    #[error("tree hash requires at least one leaf")]
    EmptyTree,

    /// A branch was requested for a leaf that is not in the tree.
    #[error("leaf index {index} out of range for a tree of {count} leaves")]
    LeafIndexOutOfRange { index: usize, count: usize },

    /// An algorithm name that is not one of the extra hashes.
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Scratchpad parameters the memory-hard backend cannot work with.
    #[error("invalid scratchpad configuration: {0}")]
    InvalidScratchpadConfig(String),
}
