use std::path::PathBuf;

use bubblast_engine::CannonSeed;
use rand::Rng as _;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SeedArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SeedArg) -> anyhow::Result<()> {
    let SeedArg { output } = arg;
    let seed: CannonSeed = rand::rng().random();
    tracing::info!(%seed, "generated cannon seed");
    Output::save_json(&seed, output.clone())?;
    Ok(())
}
