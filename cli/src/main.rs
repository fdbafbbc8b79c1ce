use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lolo_core::{Coord, GameConfig, ModeKind, PlayEngine};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

mod demo;
mod logger;
mod play;
mod power;
mod replay;

#[derive(Parser, Debug)]
#[command(version, about = "Tile-matching puzzle in the terminal", long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game, reading moves from stdin
    Play(play::PlayArgs),
    /// Watch the computer play
    Demo(demo::DemoArgs),
    /// Show a stored final board
    Replay {
        /// JSON snapshot, as printed at game over
        snapshot: PathBuf,
        #[arg(short, long, default_value_t = ModeKind::Regular)]
        mode: ModeKind,
    },
}

#[derive(Args, Debug, Clone)]
pub(crate) struct GameArgs {
    /// regular, make13, lucky7 or unlimited
    #[arg(short, long, default_value_t = ModeKind::Regular)]
    mode: ModeKind,

    #[arg(long, default_value_t = GameConfig::DEFAULT_SIZE.0)]
    rows: Coord,

    #[arg(long, default_value_t = GameConfig::DEFAULT_SIZE.1)]
    cols: Coord,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl GameArgs {
    pub(crate) fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| SmallRng::from_os_rng().random())
    }

    pub(crate) fn config(&self, seed: u64) -> GameConfig {
        GameConfig::new((self.rows, self.cols), seed)
    }

    pub(crate) fn new_engine(&self, config: GameConfig) -> Result<PlayEngine> {
        PlayEngine::new(self.mode.build(), config)
            .with_context(|| format!("Could not start a {} game", self.mode))
    }
}

/// Grid with row and column labels so moves can be typed as `row col`.
pub(crate) fn render(engine: &PlayEngine) -> String {
    let (_, cols) = engine.size();
    let mut out = String::from("    ");
    for col in 0..cols {
        out.push_str(&format!("{col:>2} "));
    }
    out.push('\n');
    for (row, line) in engine.grid().to_string().lines().enumerate() {
        out.push_str(&format!("{row:>2} |{line}\n"));
    }
    out
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose.log_level_filter())?;
    log::debug!("{cli:?}");

    match cli.command {
        Command::Play(args) => play::run(&args),
        Command::Demo(args) => demo::run(&args),
        Command::Replay { snapshot, mode } => replay::run(&snapshot, mode),
    }
}
