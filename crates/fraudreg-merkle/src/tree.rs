//! # Array-Encoded Sorted-Pair Merkle Tree
//!
//! Low-level tree primitives shared by [`crate::StandardMerkleTree`] and the
//! dump loader. A tree over `n` leaves is a flat array of `2n - 1` nodes:
//!
//! - node `0` is the root;
//! - the children of node `i` are `2i + 1` and `2i + 2`;
//! - sorted leaf `k` is stored at `2n - 2 - k` (leaves fill the tail in
//!   reverse order).
//!
//! When a level has an odd number of nodes nothing is duplicated: the array
//! layout lifts the leftover node so that leaves sit at depth `⌊log2 n⌋` or
//! `⌈log2 n⌉`. Roots are bit-compatible with the OpenZeppelin
//! `StandardMerkleTree` reference and its on-chain `MerkleProof` verifier.
//!
//! ## Algorithm
//!
//! - Node: `keccak256(min(a, b) || max(a, b))` (sorted-pair hashing), so proofs
//!   carry no left/right side information.
//! - Proof: siblings from the leaf up to, but excluding, the root.
//! - Multiproof: OpenZeppelin `multiProofVerify` flag semantics.

use std::collections::VecDeque;

use fraudreg_core::{keccak256, B256};
use serde::{Deserialize, Serialize};

use crate::error::MerkleError;

// ---------------------------------------------------------------------------
// Node hashing and index arithmetic
// ---------------------------------------------------------------------------

/// Hash two nodes in ascending order: `keccak256(min || max)`.
pub fn hash_pair(a: &B256, b: &B256) -> B256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo.as_slice());
    buf[32..].copy_from_slice(hi.as_slice());
    keccak256(buf)
}

fn left_child(i: usize) -> usize {
    2 * i + 1
}

fn right_child(i: usize) -> usize {
    2 * i + 2
}

/// Parent of a non-root node.
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

/// Sibling of a non-root node.
fn sibling(i: usize) -> usize {
    if i % 2 == 1 {
        i + 1
    } else {
        i - 1
    }
}

fn is_internal_node(tree: &[B256], i: usize) -> bool {
    right_child(i) < tree.len()
}

/// Whether `i` indexes a leaf of `tree`.
pub fn is_leaf_node(tree: &[B256], i: usize) -> bool {
    i < tree.len() && !is_internal_node(tree, i)
}

fn check_leaf_node(tree: &[B256], i: usize) -> Result<(), MerkleError> {
    if is_leaf_node(tree, i) {
        Ok(())
    } else {
        Err(MerkleError::InvalidProof(format!(
            "index {i} is not a leaf of a {}-node tree",
            tree.len()
        )))
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Build the node array over `leaves`, which must already be sorted.
pub fn make_merkle_tree(leaves: &[B256]) -> Result<Vec<B256>, MerkleError> {
    if leaves.is_empty() {
        return Err(MerkleError::EmptyBatch);
    }
    let n = leaves.len();
    let len = 2 * n - 1;
    let mut tree = vec![B256::ZERO; len];
    for (k, leaf) in leaves.iter().enumerate() {
        tree[len - 1 - k] = *leaf;
    }
    for i in (0..n - 1).rev() {
        tree[i] = hash_pair(&tree[left_child(i)], &tree[right_child(i)]);
    }
    Ok(tree)
}

/// Check that every internal node is the pair hash of its children.
pub fn is_valid_merkle_tree(tree: &[B256]) -> bool {
    if tree.is_empty() {
        return false;
    }
    tree.iter().enumerate().all(|(i, node)| {
        let (l, r) = (left_child(i), right_child(i));
        if r >= tree.len() {
            l >= tree.len()
        } else {
            *node == hash_pair(&tree[l], &tree[r])
        }
    })
}

// ---------------------------------------------------------------------------
// Single-leaf proofs
// ---------------------------------------------------------------------------

/// Sibling path from the leaf at node index `index` to the root.
pub fn get_proof(tree: &[B256], index: usize) -> Result<Vec<B256>, MerkleError> {
    check_leaf_node(tree, index)?;
    let mut proof = Vec::new();
    let mut i = index;
    while i > 0 {
        proof.push(tree[sibling(i)]);
        i = parent(i);
    }
    Ok(proof)
}

/// Fold `proof` over `leaf` with sorted-pair hashing.
pub fn process_proof(leaf: &B256, proof: &[B256]) -> B256 {
    proof.iter().fold(*leaf, |acc, sib| hash_pair(&acc, sib))
}

// ---------------------------------------------------------------------------
// Multiproofs
// ---------------------------------------------------------------------------

/// A proof for several leaves at once.
///
/// `leaves` are ordered by descending tree index, which is the order the
/// on-chain verifier consumes them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiProof<T> {
    /// The proven leaves (or values), in consumption order.
    pub leaves: Vec<T>,
    /// Sibling hashes not derivable from `leaves`.
    pub proof: Vec<B256>,
    /// `true`: combine two stack items; `false`: combine with next `proof` item.
    pub proof_flags: Vec<bool>,
}

/// Build a multiproof for the leaves at node indices `indices`.
pub fn get_multi_proof(tree: &[B256], indices: &[usize]) -> Result<MultiProof<B256>, MerkleError> {
    for &i in indices {
        check_leaf_node(tree, i)?;
    }
    let mut sorted = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return Err(MerkleError::InvalidProof(
            "cannot prove a duplicated index".to_string(),
        ));
    }

    let mut stack: VecDeque<usize> = sorted.iter().copied().collect();
    let mut proof = Vec::new();
    let mut proof_flags = Vec::new();

    while let Some(&j) = stack.front() {
        if j == 0 {
            break;
        }
        stack.pop_front();
        let s = sibling(j);
        let p = parent(j);
        if stack.front() == Some(&s) {
            proof_flags.push(true);
            stack.pop_front();
        } else {
            proof_flags.push(false);
            proof.push(tree[s]);
        }
        stack.push_back(p);
    }

    if indices.is_empty() {
        proof.push(tree[0]);
    }

    Ok(MultiProof {
        leaves: sorted.iter().map(|&i| tree[i]).collect(),
        proof,
        proof_flags,
    })
}

/// Recompute the root committed to by a multiproof.
pub fn process_multi_proof(multiproof: &MultiProof<B256>) -> Result<B256, MerkleError> {
    let unflagged = multiproof.proof_flags.iter().filter(|f| !**f).count();
    if multiproof.proof.len() < unflagged {
        return Err(MerkleError::InvalidProof(
            "fewer proof hashes than unflagged steps".to_string(),
        ));
    }
    if multiproof.leaves.len() + multiproof.proof.len() != multiproof.proof_flags.len() + 1 {
        return Err(MerkleError::InvalidProof(
            "leaves + proof must equal proof_flags + 1".to_string(),
        ));
    }

    let mut stack: VecDeque<B256> = multiproof.leaves.iter().copied().collect();
    let mut proof: VecDeque<B256> = multiproof.proof.iter().copied().collect();
    let exhausted = || MerkleError::InvalidProof("multiproof ran out of hashes".to_string());

    for &flag in &multiproof.proof_flags {
        let a = stack.pop_front().ok_or_else(exhausted)?;
        let b = if flag {
            stack.pop_front()
        } else {
            proof.pop_front()
        }
        .ok_or_else(exhausted)?;
        stack.push_back(hash_pair(&a, &b));
    }

    stack
        .pop_back()
        .or_else(|| proof.pop_front())
        .ok_or_else(exhausted)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the tree as an indented outline, one node per line.
///
/// ```text
/// 0) 0x79de…
/// ├─ 1) 0x8b1c…
/// │  ├─ 3) 0x3159…
/// │  └─ 4) 0x26cc…
/// └─ 2) 0x7b79…
/// ```
pub fn render_merkle_tree(tree: &[B256]) -> String {
    let mut lines = Vec::with_capacity(tree.len());
    // `true` in a path means "more siblings follow at this depth".
    let mut stack: Vec<(usize, Vec<bool>)> = vec![(0, Vec::new())];

    while let Some((i, path)) = stack.pop() {
        if i >= tree.len() {
            continue;
        }
        let mut line = String::new();
        if let Some((last, ancestors)) = path.split_last() {
            for &more in ancestors {
                line.push_str(if more { "│  " } else { "   " });
            }
            line.push_str(if *last { "├─ " } else { "└─ " });
        }
        line.push_str(&format!("{i}) {}", tree[i]));
        lines.push(line);

        if is_internal_node(tree, i) {
            let mut right = path.clone();
            right.push(false);
            stack.push((right_child(i), right));
            let mut left = path;
            left.push(true);
            stack.push((left_child(i), left));
        }
    }

    lines.join("\n")
}
