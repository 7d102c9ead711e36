//! # Render Subcommand
//!
//! Prints a stored tree as an indented node outline for audit.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the render subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// standard-v1 tree dump.
    #[arg(long)]
    pub tree: PathBuf,
}

/// Run the render subcommand.
pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let tree = crate::load_tree(&args.tree)?;
    println!("{}", tree.render());
    Ok(())
}
