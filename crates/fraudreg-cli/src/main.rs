//! # fraudreg CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Fraud registry batch tooling.
///
/// Builds Merkle batch trees, extracts and checks inclusion proofs, and
/// renders stored trees.
#[derive(Parser, Debug)]
#[command(name = "fraudreg", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Build a batch tree and print its root and sorted arrays.
    Build(fraudreg_cli::build::BuildArgs),
    /// Inclusion proof for one entry of a stored tree.
    Proof(fraudreg_cli::proof::ProofArgs),
    /// Check an inclusion proof against a root.
    Verify(fraudreg_cli::verify::VerifyArgs),
    /// Print a stored tree as an outline.
    Render(fraudreg_cli::render::RenderArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs on stderr; stdout is command output.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => fraudreg_cli::build::run(args),
        Commands::Proof(args) => fraudreg_cli::proof::run(args),
        Commands::Verify(args) => fraudreg_cli::verify::run(args),
        Commands::Render(args) => fraudreg_cli::render::run(args),
    }
}
