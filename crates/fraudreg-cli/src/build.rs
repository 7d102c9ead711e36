//! # Build Subcommand
//!
//! Reads a batch of entries, builds its tree, and prints the values a
//! `registerBatch` submission needs: the root and the leaf-sorted parallel
//! arrays.
//!
//! Input is a JSON array of `{"primary": "0x…", "chainId": "0x…"}` objects.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use fraudreg_core::{Entry, EntryKind, B256};
use fraudreg_merkle::{BatchArrays, BatchLimits, StandardMerkleTree};
use serde::Serialize;

/// Arguments for the build subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Entry kind: wallet, transaction or contract.
    #[arg(long)]
    pub kind: EntryKind,
    /// JSON file with the batch entries.
    #[arg(long)]
    pub input: PathBuf,
    /// Write the standard-v1 tree dump here.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Entry ceiling; overrides FRAUDREG_MAX_BATCH_ENTRIES.
    #[arg(long)]
    pub max_entries: Option<usize>,
}

/// What `build` prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSummary {
    /// Entry kind of the batch.
    pub kind: EntryKind,
    /// Merkle root.
    pub root: B256,
    /// Number of leaves.
    pub leaf_count: usize,
    /// `primaryValues[]` and `chainIds[]` in submission order.
    #[serde(flatten)]
    pub arrays: BatchArrays,
}

/// Build the tree described by `args`, writing the dump if requested.
pub fn build_batch(args: &BuildArgs) -> anyhow::Result<(StandardMerkleTree, BuildSummary)> {
    let limits = match args.max_entries {
        Some(max) => BatchLimits::new(max).context("invalid --max-entries")?,
        None => BatchLimits::from_env()?,
    };

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("reading entries {}", args.input.display()))?;
    let entries: Vec<Entry> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing entries {}", args.input.display()))?;

    let tree = StandardMerkleTree::build_for(args.kind, &entries, &limits)
        .with_context(|| format!("building {} batch", args.kind))?;

    if let Some(out) = &args.out {
        fs::write(out, fraudreg_merkle::serialize(&tree)?)
            .with_context(|| format!("writing tree dump {}", out.display()))?;
        tracing::info!(path = %out.display(), "wrote tree dump");
    }

    let summary = BuildSummary {
        kind: args.kind,
        root: tree.root(),
        leaf_count: tree.leaf_count(),
        arrays: tree.batch_arrays(),
    };
    Ok((tree, summary))
}

/// Run the build subcommand.
pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let (_, summary) = build_batch(&args)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
