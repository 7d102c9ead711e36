//! # Tree Dump — `standard-v1` JSON Format
//!
//! Serializes a [`StandardMerkleTree`] to the interoperable dump shape used
//! by CLI tooling and the web client for audit and retry storage:
//!
//! ```json
//! {
//!   "format": "standard-v1",
//!   "tree": ["0x…root", "0x…", "…"],
//!   "values": [{ "value": ["0x…", "0x…"], "treeIndex": 4 }],
//!   "leafEncoding": ["address", "bytes32"]
//! }
//! ```
//!
//! `tree` is the flat node array; the children of node `i` are `2i + 1` and
//! `2i + 2`. `values` are in the original input order with the caller's
//! casing. Field order and compact output match the reference dumper, so a
//! dump written here is byte-identical to one written by the web client for
//! the same batch.
//!
//! ## Security Invariant
//!
//! Loading never trusts stored hashes. Every leaf is recomputed from its
//! value and every internal node from its children before the tree is
//! returned; any mismatch is a [`MerkleError::Format`].

use fraudreg_core::{Entry, LeafEncoding, SolType, B256};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::MerkleError;
use crate::standard::{IndexedEntry, StandardMerkleTree};

/// The only supported format tag.
pub const FORMAT_TAG: &str = "standard-v1";

/// Serde image of the dump document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDump {
    /// Format/version tag.
    pub format: String,
    /// Node array, root first.
    pub tree: Vec<B256>,
    /// Values in input order with their node index.
    pub values: Vec<DumpValue>,
    /// Solidity type tags of the two leaf fields.
    pub leaf_encoding: Vec<String>,
}

/// One stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpValue {
    /// `[primary, chainId]` as originally supplied.
    pub value: [String; 2],
    /// Node index of the value's leaf.
    pub tree_index: usize,
}

impl StandardMerkleTree {
    /// Produce the dump document for this tree.
    pub fn dump(&self) -> TreeDump {
        TreeDump {
            format: FORMAT_TAG.to_string(),
            tree: self.nodes().to_vec(),
            values: self
                .values()
                .iter()
                .map(|iv| DumpValue {
                    value: iv.entry.clone().into(),
                    tree_index: iv.tree_index,
                })
                .collect(),
            leaf_encoding: self
                .leaf_encoding()
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
        }
    }

    /// Rebuild a tree from a dump document, verifying every hash.
    pub fn load(dump: TreeDump) -> Result<Self, MerkleError> {
        if dump.format != FORMAT_TAG {
            return Err(MerkleError::Format(format!(
                "unrecognized format tag {:?}; expected {FORMAT_TAG:?}",
                dump.format
            )));
        }
        let leaf_encoding = parse_leaf_encoding(&dump.leaf_encoding)?;
        let values = dump
            .values
            .into_iter()
            .map(|v| IndexedEntry {
                entry: Entry::from(v.value),
                tree_index: v.tree_index,
            })
            .collect();
        Self::from_parts(dump.tree, values, leaf_encoding)
    }
}

fn parse_leaf_encoding(tags: &[String]) -> Result<LeafEncoding, MerkleError> {
    match tags {
        [first, second] => {
            let parse = |tag: &String| {
                tag.parse::<SolType>()
                    .map_err(|e| MerkleError::Format(e.to_string()))
            };
            Ok([parse(first)?, parse(second)?])
        }
        _ => Err(MerkleError::Format(format!(
            "leafEncoding must have 2 type tags, found {}",
            tags.len()
        ))),
    }
}

/// Serialize `tree` to compact `standard-v1` JSON.
pub fn serialize(tree: &StandardMerkleTree) -> Result<String, MerkleError> {
    Ok(serde_json::to_string(&tree.dump())?)
}

/// Serialize `tree` to indented `standard-v1` JSON.
pub fn serialize_pretty(tree: &StandardMerkleTree) -> Result<String, MerkleError> {
    Ok(serde_json::to_string_pretty(&tree.dump())?)
}

/// Parse and verify a `standard-v1` JSON document.
pub fn deserialize(json: &str) -> Result<StandardMerkleTree, MerkleError> {
    let dump: TreeDump = serde_json::from_str(json).map_err(|e| {
        warn!(error = %e, "malformed tree dump");
        MerkleError::from(e)
    })?;
    let tree = StandardMerkleTree::load(dump).map_err(|e| {
        warn!(error = %e, "rejected tree dump");
        e
    })?;
    debug!(
        leaf_count = tree.leaf_count(),
        root = %tree.root(),
        "loaded tree dump"
    );
    Ok(tree)
}
