//! Logging setup for applications embedding the registry
//!
//! The library only emits `tracing` events. These helpers install a plain
//! fmt subscriber for programs that have none of their own.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::constants::log::LEVEL_ENV;

/// Maps a level name to a tracing level, unknown names fall back to INFO
pub fn parse_level(name: &str) -> Level {
    match name.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Installs a global fmt subscriber at `level`
pub fn init(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")
}

/// Reads the level from `LOG_LEVEL`, defaulting to info
pub fn init_from_env() -> Result<()> {
    let level = std::env::var(LEVEL_ENV)
        .map(|value| parse_level(&value))
        .unwrap_or(Level::INFO);
    init(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level(" warn "), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }
}
