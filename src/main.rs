use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use gift_snake::game::SnakeGame;
use gift_snake::logging::init_logging;
use gift_snake::GameConfig;

/// Snake on a fixed grid, with a bonus gift every few apples.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct SnakeArgs {
    /// Width and height of the board in cells
    #[arg(long, default_value_t = 20)]
    grid_size: i32,

    /// Starting tick interval in milliseconds
    #[arg(long, default_value_t = 250.0)]
    interval: f64,

    /// Seed for apple and gift placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<&SnakeArgs> for GameConfig {
    fn from(args: &SnakeArgs) -> Self {
        GameConfig {
            grid_size: args.grid_size,
            base_interval_ms: args.interval,
            seed: args.seed,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    let args = SnakeArgs::parse();
    init_logging(args.log_file.as_deref(), &args.log_level)?;

    let config = GameConfig::from(&args);
    config.validate()?;

    let mut game = SnakeGame::new(config)?;
    let res = game.play();
    // Give the terminal back before reporting anything
    game.restore()?;

    Ok(res?)
}
