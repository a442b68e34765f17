//! Log sink for the terminal game.
//!
//! The game owns the screen in raw mode, so logs are only written when a file
//! is given. Without one no subscriber is installed and events are dropped.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

pub fn init_logging(log_file: Option<&Path>, level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let path = match log_file {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    tracing::info!(target: "logging", level, file = %path.display(), "logging initialized");
    Ok(())
}
