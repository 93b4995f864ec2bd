//! Log file setup.
//!
//! The terminal belongs to the game, so logs only ever go to a file.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{RunConfig, DEFAULT_LOG_FILTER};

/// Install the global subscriber if a log path is configured.
///
/// Returns whether logging is active.
pub fn init(config: &RunConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;

    Ok(true)
}
