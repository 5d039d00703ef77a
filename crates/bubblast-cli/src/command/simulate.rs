use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context as _;
use bubblast_engine::{
    Bubble, BubbleCannon, BubbleColor, BubbleGrid, CannonConfig, CannonPiece as _, CannonSeed,
    ColorFrequencies, SelectionSource,
};
use rand::Rng as _;
use serde::Serialize;

use crate::util::{self, Output};

const DEFAULT_RELOADS: usize = 100;

const SAMPLE_BOARD: [&str; 6] = [
    "RRBBOOGGRRBB",
    "RBBOOGGRRBB",
    "RROG#GRRBBOO",
    ".R.G..R*.B.",
    "..R...R.....",
    ".......$",
];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Board JSON file (`{"rows": [...]}`); uses a built-in sample board if omitted
    #[arg(long)]
    board: Option<PathBuf>,
    /// Cannon config JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the chance range of the config
    #[arg(long)]
    chance_range: Option<u32>,
    /// Override the luck rating of the config
    #[arg(long)]
    luck_rating: Option<u32>,
    /// Seed as 32 hex digits; random if omitted
    #[arg(long)]
    seed: Option<CannonSeed>,
    /// Number of reloads to perform
    #[arg(long, default_value_t = DEFAULT_RELOADS)]
    reloads: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for SimulateArg {
    fn default() -> Self {
        Self {
            board: None,
            config: None,
            chance_range: None,
            luck_rating: None,
            seed: None,
            reloads: DEFAULT_RELOADS,
            output: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: CannonSeed,
    config: CannonConfig,
    board: BubbleGrid,
    board_frequencies: ColorFrequencies,
    initial: [Bubble; 2],
    fired: String,
    produced: BTreeMap<BubbleColor, usize>,
    sources: BTreeMap<SelectionSource, usize>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        board,
        config,
        chance_range,
        luck_rating,
        seed,
        reloads,
        output,
    } = arg;

    let board = match board {
        Some(path) => util::read_board_file(path)?,
        None => BubbleGrid::from_rows(SAMPLE_BOARD).context("Failed to parse sample board")?,
    };
    let base_config = match config {
        Some(path) => util::read_config_file(path)?,
        None => CannonConfig::DEFAULT,
    };
    let config = CannonConfig::new(
        chance_range.unwrap_or(base_config.chance_range()),
        luck_rating.unwrap_or(base_config.luck_rating()),
    )
    .context("Invalid cannon config")?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    tracing::info!(
        %seed,
        chance_range = config.chance_range(),
        luck_rating = config.luck_rating(),
        bubbles = board.len(),
        reloads,
        "starting simulation"
    );

    let report = simulate(board, config, seed, *reloads);

    tracing::info!(
        fired = report.fired.len(),
        sources = ?report.sources,
        "simulation finished"
    );
    Output::save_json(&report, output.clone())?;
    Ok(())
}

fn simulate(
    board: BubbleGrid,
    config: CannonConfig,
    seed: CannonSeed,
    reloads: usize,
) -> SimulationReport {
    let mut cannon = BubbleCannon::with_seed(&board, config, seed);
    let initial = [*cannon.current(), *cannon.next()];

    let mut fired = String::with_capacity(reloads);
    let mut produced: BTreeMap<_, _> = BubbleColor::ALL.into_iter().map(|c| (c, 0)).collect();
    let mut sources = BTreeMap::new();
    for _ in 0..reloads {
        fired.push(cannon.reload().as_char());
        if let Some(color) = cannon.next().color() {
            *produced.entry(color).or_insert(0) += 1;
        }
        *sources.entry(cannon.last_source()).or_insert(0) += 1;
    }

    let board_frequencies = ColorFrequencies::count(&board);
    SimulationReport {
        seed,
        config,
        board,
        board_frequencies,
        initial,
        fired,
        produced,
        sources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_board_parses() {
        let board = BubbleGrid::from_rows(SAMPLE_BOARD).unwrap();
        let freq = ColorFrequencies::count(&board);
        assert_eq!(freq.most_common(), Some(BubbleColor::Red));
    }

    #[test]
    fn test_always_lucky_produces_most_common_color() {
        // 4 red, 1 green
        let board = BubbleGrid::from_rows(["RRRR", "G"]).unwrap();
        let config = CannonConfig::always_lucky(100).unwrap();
        let report = simulate(board, config, CannonSeed::from_u64(1), 10);

        assert_eq!(report.fired.len(), 10);
        assert_eq!(report.produced[&BubbleColor::Red], 10);
        assert_eq!(report.sources.get(&SelectionSource::MostCommon), Some(&10));
        assert_eq!(report.sources.len(), 1);
    }

    #[test]
    fn test_report_is_reproducible() {
        let board = BubbleGrid::from_rows(SAMPLE_BOARD).unwrap();
        let seed = CannonSeed::from_u64(0xabc);
        let report1 = simulate(board.clone(), CannonConfig::DEFAULT, seed, 50);
        let report2 = simulate(board, CannonConfig::DEFAULT, seed, 50);
        assert_eq!(report1.fired, report2.fired);
        assert_eq!(report1.produced, report2.produced);
        assert_eq!(report1.produced.values().sum::<usize>(), 50);
    }

    #[test]
    fn test_report_serializes() {
        let board = BubbleGrid::from_rows(["BB", "R"]).unwrap();
        let report = simulate(board, CannonConfig::DEFAULT, CannonSeed::from_u64(2), 5);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["board"]["rows"][0], "BB");
        assert_eq!(json["board_frequencies"]["B"], 2);
        assert_eq!(json["seed"], "00000000000000000000000000000002");
        assert_eq!(json["fired"].as_str().unwrap().len(), 5);
    }
}
