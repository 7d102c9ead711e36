//! # Standard Merkle Tree — Batch Tree with Value Lookup
//!
//! [`StandardMerkleTree`] is the tree a batch submission works with: it owns
//! the node array, the caller's entries (input order, original casing) with
//! their tree positions, and the leaf encoding that produced the leaves.
//!
//! ## Lifecycle
//!
//! A tree is built once from a fixed batch, queried for its root and proofs,
//! optionally dumped for audit/retry, and dropped after the on-chain
//! transaction confirms. There is no mutation API.
//!
//! ## Security Invariant
//!
//! Every constructor validates its input fully: `build` rejects empty,
//! oversized, malformed and duplicate-leaf batches, and `load` (see
//! [`crate::dump`]) re-derives every leaf and internal node. A tree that
//! exists is therefore always consistent, and no root or proof is ever
//! produced from invalid input.

use std::collections::HashMap;

use fraudreg_core::{Entry, EntryKind, LeafEncoding, ValueError, B256};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::BatchLimits;
use crate::error::MerkleError;
use crate::leaf::leaf_hash;
use crate::sort::{find_duplicate_leaf, sort_by_leaf, BatchArrays};
use crate::tree::{
    get_multi_proof, get_proof, is_leaf_node, is_valid_merkle_tree, make_merkle_tree,
    process_multi_proof, process_proof, render_merkle_tree, MultiProof,
};

/// A batch entry and the node index of its leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedEntry {
    /// The entry as supplied.
    pub entry: Entry,
    /// Index of its leaf in the node array.
    pub tree_index: usize,
}

/// An immutable sorted-pair Merkle tree over one registry batch.
#[derive(Debug, Clone)]
pub struct StandardMerkleTree {
    tree: Vec<B256>,
    values: Vec<IndexedEntry>,
    leaf_encoding: LeafEncoding,
    /// Leaf hash → position in `values`.
    hash_lookup: HashMap<B256, usize>,
}

impl StandardMerkleTree {
    /// Build the tree for a batch of `kind` entries.
    pub fn build_for(
        kind: EntryKind,
        entries: &[Entry],
        limits: &BatchLimits,
    ) -> Result<Self, MerkleError> {
        Self::build(kind.leaf_encoding(), entries, limits)
    }

    /// Build the tree for `entries` under an explicit leaf encoding.
    ///
    /// Entries are sorted by leaf internally, so the root does not depend on
    /// input order.
    pub fn build(
        leaf_encoding: LeafEncoding,
        entries: &[Entry],
        limits: &BatchLimits,
    ) -> Result<Self, MerkleError> {
        if entries.is_empty() {
            warn!("rejected empty batch");
            return Err(MerkleError::EmptyBatch);
        }
        if entries.len() > limits.max_entries {
            warn!(
                count = entries.len(),
                limit = limits.max_entries,
                "rejected oversized batch"
            );
            return Err(MerkleError::BatchTooLarge {
                count: entries.len(),
                limit: limits.max_entries,
            });
        }

        let sorted = sort_by_leaf(&leaf_encoding, entries)?;
        if let Some((leaf, first, second)) = find_duplicate_leaf(&sorted) {
            warn!(%leaf, first, second, "rejected batch with duplicate leaf");
            return Err(MerkleError::DuplicateLeaf {
                leaf,
                first,
                second,
            });
        }

        let leaves: Vec<B256> = sorted.iter().map(|s| s.leaf).collect();
        let tree = make_merkle_tree(&leaves)?;

        let mut values: Vec<IndexedEntry> = entries
            .iter()
            .map(|entry| IndexedEntry {
                entry: entry.clone(),
                tree_index: 0,
            })
            .collect();
        for (k, s) in sorted.iter().enumerate() {
            values[s.input_index].tree_index = tree.len() - 1 - k;
        }
        let hash_lookup = sorted.iter().map(|s| (s.leaf, s.input_index)).collect();

        let built = Self {
            tree,
            values,
            leaf_encoding,
            hash_lookup,
        };
        debug!(
            leaf_count = built.leaf_count(),
            root = %built.root(),
            "built batch merkle tree"
        );
        Ok(built)
    }

    /// Reassemble a tree from stored parts, re-deriving every hash.
    ///
    /// Any inconsistency is reported as [`MerkleError::Format`].
    pub(crate) fn from_parts(
        tree: Vec<B256>,
        values: Vec<IndexedEntry>,
        leaf_encoding: LeafEncoding,
    ) -> Result<Self, MerkleError> {
        if values.is_empty() {
            return Err(MerkleError::Format("tree has no values".to_string()));
        }
        if tree.len() != 2 * values.len() - 1 {
            return Err(MerkleError::Format(format!(
                "{} values require {} nodes, found {}",
                values.len(),
                2 * values.len() - 1,
                tree.len()
            )));
        }
        if !is_valid_merkle_tree(&tree) {
            return Err(MerkleError::Format(
                "internal node does not match its children".to_string(),
            ));
        }
        // Sorted leaf k sits at tree[len - 1 - k], so the leaf region read
        // forward must be strictly descending.
        let leaf_region = &tree[values.len() - 1..];
        if let Some(k) = leaf_region.windows(2).position(|w| w[0] <= w[1]) {
            return Err(MerkleError::Format(format!(
                "leaves at nodes {} and {} are not in ascending order",
                values.len() + k,
                values.len() - 1 + k
            )));
        }

        let mut hash_lookup = HashMap::with_capacity(values.len());
        for (i, iv) in values.iter().enumerate() {
            if !is_leaf_node(&tree, iv.tree_index) {
                return Err(MerkleError::Format(format!(
                    "value {i}: tree index {} is not a leaf",
                    iv.tree_index
                )));
            }
            let leaf = leaf_hash(&leaf_encoding, &iv.entry)
                .map_err(|e| MerkleError::Format(format!("value {i}: {e}")))?;
            if leaf != tree[iv.tree_index] {
                return Err(MerkleError::Format(format!(
                    "value {i}: leaf {leaf} does not match node {}",
                    iv.tree_index
                )));
            }
            if hash_lookup.insert(leaf, i).is_some() {
                return Err(MerkleError::Format(format!(
                    "value {i}: duplicate leaf {leaf}"
                )));
            }
        }

        Ok(Self {
            tree,
            values,
            leaf_encoding,
            hash_lookup,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The Merkle root submitted on-chain.
    pub fn root(&self) -> B256 {
        self.tree[0]
    }

    /// Number of leaves (entries) in the tree.
    pub fn leaf_count(&self) -> usize {
        self.values.len()
    }

    /// The leaf encoding of this batch.
    pub fn leaf_encoding(&self) -> &LeafEncoding {
        &self.leaf_encoding
    }

    /// The full node array, root first.
    pub fn nodes(&self) -> &[B256] {
        &self.tree
    }

    /// Entries in the caller's input order, with their leaf positions.
    pub fn values(&self) -> &[IndexedEntry] {
        &self.values
    }

    /// Entries in ascending leaf order.
    pub fn sorted_entries(&self) -> Vec<&Entry> {
        let mut ordered: Vec<&IndexedEntry> = self.values.iter().collect();
        ordered.sort_by(|a, b| b.tree_index.cmp(&a.tree_index));
        ordered.into_iter().map(|iv| &iv.entry).collect()
    }

    /// Parallel `registerBatch` arrays in leaf order.
    pub fn batch_arrays(&self) -> BatchArrays {
        BatchArrays::from_sorted(self.sorted_entries())
    }

    /// Compute the leaf of `entry` under this tree's encoding.
    pub fn leaf_hash(&self, entry: &Entry) -> Result<B256, ValueError> {
        leaf_hash(&self.leaf_encoding, entry)
    }

    /// Position in [`values`](Self::values) of the entry equal to `entry`.
    ///
    /// Matching compares ABI words, so hex casing is irrelevant while both
    /// fields must agree.
    pub fn leaf_lookup(&self, entry: &Entry) -> Result<usize, MerkleError> {
        let not_found = || {
            MerkleError::NotFound(format!(
                "({}, {})",
                entry.primary, entry.chain_id
            ))
        };
        let leaf = self.leaf_hash(entry).map_err(|_| not_found())?;
        self.hash_lookup.get(&leaf).copied().ok_or_else(not_found)
    }

    // -----------------------------------------------------------------------
    // Proofs
    // -----------------------------------------------------------------------

    /// Sibling path proving `entry` is in this tree.
    pub fn get_proof(&self, entry: &Entry) -> Result<Vec<B256>, MerkleError> {
        let index = self.leaf_lookup(entry)?;
        self.get_proof_at(index)
    }

    /// Sibling path for the entry at position `value_index` of
    /// [`values`](Self::values).
    pub fn get_proof_at(&self, value_index: usize) -> Result<Vec<B256>, MerkleError> {
        let iv = self.values.get(value_index).ok_or_else(|| {
            MerkleError::NotFound(format!(
                "value index {value_index} out of range for {} values",
                self.values.len()
            ))
        })?;
        let proof = get_proof(&self.tree, iv.tree_index)?;
        debug!(value_index, depth = proof.len(), "generated inclusion proof");
        Ok(proof)
    }

    /// Check `proof` for `entry` against this tree's root.
    pub fn verify(&self, entry: &Entry, proof: &[B256]) -> bool {
        verify(&self.root(), &self.leaf_encoding, entry, proof).unwrap_or(false)
    }

    /// Multiproof covering every entry in `entries`.
    pub fn get_multi_proof(&self, entries: &[Entry]) -> Result<MultiProof<Entry>, MerkleError> {
        let indices = entries
            .iter()
            .map(|e| self.leaf_lookup(e).map(|i| self.values[i].tree_index))
            .collect::<Result<Vec<_>, _>>()?;
        let mp = get_multi_proof(&self.tree, &indices)?;
        let leaves = mp
            .leaves
            .iter()
            .map(|leaf| {
                self.hash_lookup
                    .get(leaf)
                    .map(|&i| self.values[i].entry.clone())
                    .ok_or_else(|| MerkleError::NotFound(format!("leaf {leaf}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MultiProof {
            leaves,
            proof: mp.proof,
            proof_flags: mp.proof_flags,
        })
    }

    /// Check a multiproof against this tree's root.
    pub fn verify_multi_proof(&self, multiproof: &MultiProof<Entry>) -> Result<bool, MerkleError> {
        verify_multi_proof(&self.root(), &self.leaf_encoding, multiproof)
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// Re-derive every leaf and node; `Format` on the first mismatch.
    pub fn validate(&self) -> Result<(), MerkleError> {
        Self::from_parts(self.tree.clone(), self.values.clone(), self.leaf_encoding).map(|_| ())
    }

    /// Indented outline of the node array.
    pub fn render(&self) -> String {
        render_merkle_tree(&self.tree)
    }
}

/// Check a single-entry proof against `root` without holding the tree.
///
/// Mirrors the on-chain check: fold the leaf with each sibling, in order.
pub fn verify(
    root: &B256,
    leaf_encoding: &LeafEncoding,
    entry: &Entry,
    proof: &[B256],
) -> Result<bool, ValueError> {
    let leaf = leaf_hash(leaf_encoding, entry)?;
    Ok(process_proof(&leaf, proof) == *root)
}

/// Check a multiproof against `root` without holding the tree.
pub fn verify_multi_proof(
    root: &B256,
    leaf_encoding: &LeafEncoding,
    multiproof: &MultiProof<Entry>,
) -> Result<bool, MerkleError> {
    let leaves = multiproof
        .leaves
        .iter()
        .enumerate()
        .map(|(index, e)| {
            leaf_hash(leaf_encoding, e).map_err(|source| MerkleError::InvalidValue { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let computed = process_multi_proof(&MultiProof {
        leaves,
        proof: multiproof.proof.clone(),
        proof_flags: multiproof.proof_flags.clone(),
    })?;
    Ok(computed == *root)
}
