//! # Error Types — Batch Construction, Proofs, and Tree Dumps
//!
//! Every failure is terminal and surfaced to the caller. A wrong root or
//! proof breaks on-chain verification without any local signal, so no
//! operation in this crate substitutes a fallback value for invalid input.

use fraudreg_core::{ValueError, B256};
use thiserror::Error;

/// Error in Merkle batch operations.
#[derive(Error, Debug)]
pub enum MerkleError {
    /// `build` was called with zero entries.
    #[error("cannot build a merkle tree from an empty batch")]
    EmptyBatch,

    /// The batch exceeds the configured entry ceiling.
    #[error("batch of {count} entries exceeds the limit of {limit}")]
    BatchTooLarge {
        /// Number of entries submitted.
        count: usize,
        /// Configured ceiling.
        limit: usize,
    },

    /// Two entries in one batch produce the same leaf.
    #[error("duplicate leaf {leaf} at input positions {first} and {second}")]
    DuplicateLeaf {
        /// The repeated leaf hash.
        leaf: B256,
        /// Input position of the first occurrence.
        first: usize,
        /// Input position of the repeat.
        second: usize,
    },

    /// An entry value cannot be ABI-encoded under the batch's leaf encoding.
    #[error("entry {index}: {source}")]
    InvalidValue {
        /// Input position of the entry.
        index: usize,
        /// Underlying decode error.
        #[source]
        source: ValueError,
    },

    /// No entry in the tree matches the requested value.
    #[error("entry not found in tree: {0}")]
    NotFound(String),

    /// A proof request or multiproof is malformed.
    #[error("invalid proof: {0}")]
    InvalidProof(String),

    /// A serialized tree is corrupt or uses an incompatible format.
    #[error("tree format error: {0}")]
    Format(String),
}

impl From<serde_json::Error> for MerkleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}
