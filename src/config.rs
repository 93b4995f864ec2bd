//! Runner configuration, read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TETRIS_SEED` | from the clock | randomizer seed (u32) |
//! | `TETRIS_RANDOMIZER` | `uniform` | `uniform` or `bag` |
//! | `TETRIS_TICK_MS` | 16 | fixed step length |
//! | `TETRIS_LOG_PATH` | unset | log file; no logging when unset |
//! | `TETRIS_LOG` | `info` | tracing filter directive |
//!
//! Unparseable values fall back to the defaults.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{GameConfig, RandomizerKind};
use crate::types::TICK_MS;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Longest accepted step; anything slower is not a game loop.
const MAX_TICK_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u32,
    pub randomizer: RandomizerKind,
    pub tick_ms: u32,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl RunConfig {
    /// Create from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup. `from_env` with an injectable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = var("TETRIS_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let randomizer = var("TETRIS_RANDOMIZER")
            .and_then(|s| RandomizerKind::from_str(&s))
            .unwrap_or_default();

        let tick_ms = var("TETRIS_TICK_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms| ms > 0 && ms <= MAX_TICK_MS)
            .unwrap_or(TICK_MS);

        let log_path = var("TETRIS_LOG_PATH").map(PathBuf::from);

        let log_filter = var("TETRIS_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            seed,
            randomizer,
            tick_ms,
            log_path,
            log_filter,
        }
    }

    /// Game setup for the `run`-th game of this session (0 for the first).
    pub fn game_config(&self, run: u32) -> GameConfig {
        GameConfig::new(self.seed.wrapping_add(run)).with_randomizer(self.randomizer)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_every_variable() {
        let config = RunConfig::from_lookup(lookup(&[
            ("TETRIS_SEED", "42"),
            ("TETRIS_RANDOMIZER", "bag"),
            ("TETRIS_TICK_MS", "20"),
            ("TETRIS_LOG_PATH", " /tmp/tetris.log "),
            ("TETRIS_LOG", "tick_tetris_core=debug"),
        ]));

        assert_eq!(config.seed, 42);
        assert_eq!(config.randomizer, RandomizerKind::Bag);
        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/tetris.log")));
        assert_eq!(config.log_filter, "tick_tetris_core=debug");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = RunConfig::from_lookup(lookup(&[
            ("TETRIS_SEED", "seven"),
            ("TETRIS_RANDOMIZER", "fair"),
            ("TETRIS_TICK_MS", "0"),
            ("TETRIS_LOG_PATH", "   "),
        ]));

        assert_eq!(config.randomizer, RandomizerKind::Uniform);
        assert_eq!(config.tick_ms, TICK_MS);
        assert_eq!(config.log_path, None);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn restarts_get_fresh_seeds() {
        let config = RunConfig::from_lookup(lookup(&[("TETRIS_SEED", "4294967295")]));
        assert_eq!(config.game_config(0).seed, u32::MAX);
        assert_eq!(config.game_config(1).seed, 0);
        assert_eq!(config.game_config(1).randomizer, config.randomizer);
    }
}
