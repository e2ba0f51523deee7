use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tui_2048::game::GameConfig;
use tui_2048::modes::HumanMode;

#[derive(Parser)]
#[command(name = "tui_2048")]
#[command(version, about = "The 2048 sliding-tile puzzle in the terminal")]
struct Cli {
    /// Grid height
    #[arg(long, default_value = "4")]
    height: usize,

    /// Grid width
    #[arg(long, default_value = "4")]
    width: usize,

    /// Tile value that wins the game
    #[arg(long, default_value = "2048")]
    win: u32,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Log to `path`, filtered by `RUST_LOG` (default `info`)
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow!("Failed to install logger: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Create game configuration from CLI arguments
    let config = GameConfig::new(cli.height, cli.width).with_win_threshold(cli.win);

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
