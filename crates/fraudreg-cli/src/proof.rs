//! # Proof Subcommand
//!
//! Inclusion proof for one entry of a stored tree, in the exact order the
//! registry contract consumes it.

use std::path::PathBuf;

use clap::Args;
use fraudreg_core::{Entry, B256};
use fraudreg_merkle::StandardMerkleTree;
use serde::Serialize;

/// Arguments for the proof subcommand.
#[derive(Args, Debug)]
pub struct ProofArgs {
    /// standard-v1 tree dump.
    #[arg(long)]
    pub tree: PathBuf,
    /// Address or transaction hash of the entry.
    #[arg(long)]
    pub primary: String,
    /// Chain identifier hash of the entry.
    #[arg(long)]
    pub chain_id: String,
}

/// What `proof` prints.
#[derive(Debug, Serialize)]
pub struct ProofOutput {
    /// Root the proof is for.
    pub root: B256,
    /// Leaf of the requested entry.
    pub leaf: B256,
    /// Sibling hashes, leaf to root.
    pub proof: Vec<B256>,
}

/// Compute the proof output for `entry` in `tree`.
pub fn prove(tree: &StandardMerkleTree, entry: &Entry) -> anyhow::Result<ProofOutput> {
    let proof = tree.get_proof(entry)?;
    Ok(ProofOutput {
        root: tree.root(),
        leaf: tree.leaf_hash(entry)?,
        proof,
    })
}

/// Run the proof subcommand.
pub fn run(args: ProofArgs) -> anyhow::Result<()> {
    let tree = crate::load_tree(&args.tree)?;
    let output = prove(&tree, &Entry::new(args.primary, args.chain_id))?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
