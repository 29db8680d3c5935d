//! Crate-wide constants
//!
//! Names, file layout and sentinel strings shared by the registry and stores.

/// Logging constants
pub mod log {
    /// Environment variable read by `logging::init_from_env`
    pub const LEVEL_ENV: &str = "LOG_LEVEL";
}

/// Backing file location constants
pub mod config {
    /// Application directory under the platform config dir
    pub const APP_DIR: &str = "game-settings";

    /// Subdirectory holding the ini files
    pub const CONFIG_SUBDIR: &str = "Config";

    /// Overrides the whole config directory when set
    pub const CONFIG_DIR_ENV: &str = "GAME_SETTINGS_CONFIG_DIR";

    /// Extension shared by all backing files
    pub const INI_EXTENSION: &str = "ini";
}

/// Replacement labels for toggle pairs declared with unusable names
pub mod toggles {
    pub const FIRST_EMPTY: &str = "FirstToggleCannotBeEmpty";
    pub const SECOND_EMPTY: &str = "SecondToggleCannotBeEmpty";
    pub const SECOND_MATCHES_FIRST: &str = "SecondToggleCannotMatchFirstToggle";
}

/// Ini syntax
pub mod ini {
    /// Line prefixes treated as comments
    pub const COMMENT_PREFIXES: &[char] = &[';', '#'];

    pub const KEY_VALUE_SEPARATOR: char = '=';
}
