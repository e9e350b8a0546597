use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_arena::game::{GameConfig, GameEngine, LevelCatalog, Mode};
use snake_arena::modes::PlayMode;
use snake_arena::storage::HighScoreStore;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_arena")]
#[command(version, about = "Snake with levels, wrap-around and local versus")]
struct Cli {
    /// Mode the first round starts in (M toggles it in game)
    #[arg(long, default_value = "single")]
    mode: CliMode,

    /// Level to open, numbered from 1
    #[arg(long, default_value = "1")]
    level: u32,

    /// JSON game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON level list replacing the built-in levels
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Board size in board units
    #[arg(long)]
    board_size: Option<u32>,

    /// Cell size in board units
    #[arg(long)]
    cell_size: Option<u32>,

    /// Where the high score is kept
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Write logs here (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliMode {
    /// One snake, speeds up as you score
    Single,
    /// Two snakes on one keyboard
    Versus,
}

impl From<CliMode> for Mode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Single => Mode::Single,
            CliMode::Versus => Mode::Versus,
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal is taken by the game, so logs only go to a file
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(board_size) = cli.board_size {
        config.board_size = board_size;
    }
    if let Some(cell_size) = cli.cell_size {
        config.cell_size = cell_size;
    }
    let catalog = match &cli.levels {
        Some(path) => LevelCatalog::load(path)?,
        None => LevelCatalog::builtin(config.grid()),
    };

    let engine = GameEngine::new(config, catalog).context("Invalid configuration")?;
    let store = HighScoreStore::new(cli.high_score_file);
    let mut play = PlayMode::new(engine, store, cli.mode.into(), cli.level)?;
    play.run().await?;

    Ok(())
}
