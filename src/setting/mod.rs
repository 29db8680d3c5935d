//! Setting descriptors
//!
//! A descriptor names where a setting lives (ini file, section, key) and what
//! values it accepts. Two kinds exist:
//! - **float**: a number kept within `[min, max]`
//! - **toggles**: a pair of labels where exactly one is active

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::config::INI_EXTENSION;

pub mod float;
pub mod toggles;

pub use float::FloatSetting;
pub use toggles::{ActiveToggle, OpposingToggles};

/// Backing file a setting is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IniFile {
    #[default]
    Game,
    GameUserSettings,
    Input,
    Engine,
}

impl IniFile {
    pub const ALL: [IniFile; 4] = [
        IniFile::Game,
        IniFile::GameUserSettings,
        IniFile::Input,
        IniFile::Engine,
    ];

    /// Name used when building registry keys
    pub fn as_str(&self) -> &'static str {
        match self {
            IniFile::Game => "Game",
            IniFile::GameUserSettings => "GameUserSettings",
            IniFile::Input => "Input",
            IniFile::Engine => "Engine",
        }
    }

    /// File name on disk, e.g. `GameUserSettings.ini`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.as_str(), INI_EXTENSION)
    }
}

impl fmt::Display for IniFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity shared by every descriptor kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SettingId {
    pub file: IniFile,
    pub section: String,
    pub key: String,
}

impl SettingId {
    pub fn new(file: IniFile, section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            file,
            section: section.into(),
            key: key.into(),
        }
    }

    /// Key used for registry lookups
    ///
    /// Plain concatenation of file name, section and key, case preserved.
    /// Empty sections or keys are accepted but collapse distinct settings
    /// onto the same registry entry. Names the ini format cannot hold, such
    /// as a key containing `=` or a section containing `]`, still register
    /// but every write to the store for them fails.
    pub fn registry_key(&self) -> String {
        format!("{}{}{}", self.file.as_str(), self.section, self.key)
    }
}

impl fmt::Display for SettingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:[{}].{}", self.file, self.section, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_key_concatenates_parts() {
        let id = SettingId::new(IniFile::GameUserSettings, "Audio", "MasterVolume");
        assert_eq!(id.registry_key(), "GameUserSettingsAudioMasterVolume");
    }

    #[test]
    fn test_registry_key_is_case_sensitive() {
        let lower = SettingId::new(IniFile::Game, "audio", "volume");
        let upper = SettingId::new(IniFile::Game, "Audio", "Volume");
        assert_ne!(lower.registry_key(), upper.registry_key());
    }

    #[test]
    fn test_registry_key_differs_per_file() {
        let game = SettingId::new(IniFile::Game, "Video", "Gamma");
        let engine = SettingId::new(IniFile::Engine, "Video", "Gamma");
        assert_ne!(game.registry_key(), engine.registry_key());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(IniFile::Game.file_name(), "Game.ini");
        assert_eq!(IniFile::GameUserSettings.file_name(), "GameUserSettings.ini");
        assert_eq!(IniFile::Input.file_name(), "Input.ini");
        assert_eq!(IniFile::Engine.file_name(), "Engine.ini");
    }
}
