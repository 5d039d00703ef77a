use clap::{Parser, Subcommand};

use self::{seed::SeedArg, simulate::SimulateArg};

mod seed;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Reload a cannon bound to a board and report the bubbles it produced
    Simulate(#[clap(flatten)] SimulateArg),
    /// Print a fresh random cannon seed
    Seed(#[clap(flatten)] SeedArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args
        .mode
        .unwrap_or(Mode::Simulate(SimulateArg::default()))
    {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Seed(arg) => seed::run(&arg)?,
    }
    Ok(())
}
