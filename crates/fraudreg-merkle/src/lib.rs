//! # fraudreg-merkle — Merkle Batch Proofs for the Fraud Registry
//!
//! Builds the Merkle tree a batch of registry entries is committed to, hands
//! out inclusion proofs for individual entries, and persists trees in the
//! `standard-v1` dump format shared with the web client.
//!
//! ## Pipeline
//!
//! ```text
//! entries ──► sort (by leaf) ──► build ──► root ──► signing / registerBatch
//!                                  │
//!                                  ├──► get_proof / get_multi_proof
//!                                  └──► dump / load
//! ```
//!
//! - [`leaf`] — `keccak256(keccak256(abi.encode(primary, chainId)))`.
//! - [`sort`] — ascending leaf order and the parallel `registerBatch` arrays.
//! - [`tree`] — array-encoded sorted-pair tree, proofs, multiproofs.
//! - [`standard`] — [`StandardMerkleTree`], the batch-level API.
//! - [`dump`] — `standard-v1` serialization.
//! - [`config`] — batch admission limits.
//!
//! ## Crate Policy
//!
//! - All operations are pure and synchronous; trees are immutable and
//!   `Send + Sync`.
//! - No error is retried or recovered internally.
//! - Depends only on `fraudreg-core` internally.

pub mod config;
pub mod dump;
pub mod error;
pub mod leaf;
pub mod sort;
pub mod standard;
pub mod tree;

pub use config::{BatchLimits, ConfigError, DEFAULT_MAX_BATCH_ENTRIES};
pub use dump::{deserialize, serialize, serialize_pretty, TreeDump, FORMAT_TAG};
pub use error::MerkleError;
pub use leaf::{compute_leaf, leaf_hash};
pub use sort::{sort_entries, BatchArrays};
pub use standard::{verify, verify_multi_proof, IndexedEntry, StandardMerkleTree};
pub use tree::{hash_pair, process_proof, MultiProof};
