//! # Verify Subcommand
//!
//! Checks an inclusion proof against a root without the tree, replaying the
//! registry contract's sorted-pair fold.

use clap::Args;
use fraudreg_core::{Entry, EntryKind, B256};

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Expected Merkle root.
    #[arg(long)]
    pub root: B256,
    /// Entry kind: wallet, transaction or contract.
    #[arg(long)]
    pub kind: EntryKind,
    /// Address or transaction hash of the entry.
    #[arg(long)]
    pub primary: String,
    /// Chain identifier hash of the entry.
    #[arg(long)]
    pub chain_id: String,
    /// Comma-separated sibling hashes, leaf to root. Empty for single-entry trees.
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub proof: Vec<B256>,
}

/// Whether the proof in `args` verifies.
pub fn check(args: &VerifyArgs) -> anyhow::Result<bool> {
    let entry = Entry::new(args.primary.clone(), args.chain_id.clone());
    Ok(fraudreg_merkle::verify(
        &args.root,
        &args.kind.leaf_encoding(),
        &entry,
        &args.proof,
    )?)
}

/// Run the verify subcommand. Fails when the proof does not verify.
pub fn run(args: VerifyArgs) -> anyhow::Result<()> {
    if check(&args)? {
        println!("valid");
        Ok(())
    } else {
        tracing::warn!(root = %args.root, "proof does not verify");
        println!("invalid");
        anyhow::bail!("proof does not verify against root {}", args.root)
    }
}
