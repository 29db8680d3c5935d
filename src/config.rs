//! Store configuration
//!
//! Decides where the ini backing files live.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::config::{APP_DIR, CONFIG_DIR_ENV, CONFIG_SUBDIR};
use crate::setting::IniFile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding `Game.ini`, `GameUserSettings.ini`, `Input.ini` and `Engine.ini`
    pub config_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Platform default: `<config dir>/game-settings/Config`
    pub fn default_dir() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(CONFIG_SUBDIR);
        path
    }

    /// Uses `GAME_SETTINGS_CONFIG_DIR` when set and non-empty, the platform default otherwise
    pub fn from_env() -> Self {
        match env::var(CONFIG_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => {
                info!(dir = %dir, "Using config directory from environment");
                Self::new(dir)
            }
            _ => Self::default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.config_dir
    }

    /// Full path of one backing file
    pub fn path_for(&self, file: IniFile) -> PathBuf {
        self.config_dir.join(file.file_name())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}
