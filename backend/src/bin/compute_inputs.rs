//! Writes the witness input for the sample donor set, e.g. for
//! `snarkjs wtns calculate` during circuit development.

use clap::Parser;
use crowdfund_zk::commitment::{compute_commitments, CommitmentHasher};
use crowdfund_zk::types::{NormalizedDonorSet, WitnessInput};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "compute-inputs", about = "Generate input.json for the crowdfund_commit circuit")]
struct Args {
    /// Where to write the witness input.
    #[arg(long, default_value = "inputs/input.json")]
    out: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let hasher = CommitmentHasher::new()?;
    let donors = NormalizedDonorSet::sample();
    let set = compute_commitments(&hasher, &donors)?;
    let input = WitnessInput::from_parts(&donors, &set)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.out, serde_json::to_vec_pretty(&input)?)?;

    tracing::info!(out = %args.out.display(), total = %input.total, "wrote witness input");
    for (i, c) in input.commitments.iter().enumerate() {
        tracing::info!(donor = i, commitment = %c);
    }

    Ok(())
}
