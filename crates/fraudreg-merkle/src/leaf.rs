//! # Leaf Encoding
//!
//! A registry leaf is the double Keccak-256 of the ABI-encoded entry:
//!
//! ```text
//! inner = keccak256(abi.encode(primary, chainId))
//! leaf  = keccak256(inner)
//! ```
//!
//! ## Security Invariant
//!
//! Internal nodes are a single Keccak-256 over 64 bytes. A leaf is a hash of
//! a 32-byte hash, so no leaf preimage has the shape of an internal-node
//! preimage. This rules out second-preimage forgeries that present an
//! internal node as a leaf.

use fraudreg_core::{abi_encode, keccak256, Entry, LeafEncoding, ValueError, B256};

/// Compute the leaf for two raw values under `encoding`.
pub fn compute_leaf(
    encoding: &LeafEncoding,
    value1: &str,
    value2: &str,
) -> Result<B256, ValueError> {
    let encoded = abi_encode(encoding, [value1, value2])?;
    Ok(keccak256(keccak256(encoded)))
}

/// Compute the leaf for an entry under `encoding`.
pub fn leaf_hash(encoding: &LeafEncoding, entry: &Entry) -> Result<B256, ValueError> {
    compute_leaf(encoding, &entry.primary, &entry.chain_id)
}
