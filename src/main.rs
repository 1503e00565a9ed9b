mod archive;
mod board;
mod config;
mod error;
mod game;
mod session;
mod snake;
mod term;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};

use config::GameConfig;
use game::Game;
use session::Session;

/// Board position as (row, col)
pub type Coords = (i32, i32);

#[derive(Parser)]
#[command(name = "snake_archive")]
#[command(version, about = "Terminal snake that keeps an archive of past runs")]
struct Cli {
    /// Number of playable columns
    #[arg(long, default_value = "20")]
    width: usize,

    /// Number of playable rows
    #[arg(long, default_value = "10")]
    height: usize,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between snake moves
    #[arg(long, default_value = "150")]
    tick_ms: u64,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = GameConfig::new(cli.width, cli.height);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let game = Game::new(&config).context("Failed to create game")?;

    Session::new(game, Duration::from_millis(cli.tick_ms)).run()
}

// The game owns the terminal, so logs only ever go to a file
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
