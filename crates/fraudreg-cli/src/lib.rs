//! # fraudreg-cli — Fraud Registry Batch Tooling
//!
//! Operator-facing commands around the Merkle batch subsystem. Trees are
//! persisted as `standard-v1` dumps so a batch built here can be proven or
//! audited later, or by the web client.
//!
//! ## Subcommands
//!
//! - `build` — Build a batch tree from an entry file; print root and sorted arrays
//! - `proof` — Inclusion proof for one entry of a stored tree
//! - `verify` — Check a proof against a root, as the registry contract does
//! - `render` — Outline of a stored tree
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handlers delegate to `fraudreg-merkle`; no hashing happens here.
//! - stdout carries only command output; logs go to stderr.

use std::fs;
use std::path::Path;

use anyhow::Context;
use fraudreg_merkle::StandardMerkleTree;

pub mod build;
pub mod proof;
pub mod render;
pub mod verify;

/// Load and verify a `standard-v1` tree dump from disk.
pub fn load_tree(path: &Path) -> anyhow::Result<StandardMerkleTree> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading tree dump {}", path.display()))?;
    fraudreg_merkle::deserialize(&json)
        .with_context(|| format!("loading tree dump {}", path.display()))
}
