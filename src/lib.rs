//! Runtime registry for user-adjustable game settings
//!
//! Settings are declared as descriptors, reconciled against ini files when
//! registered, and updated through a registry that validates, persists and
//! notifies listeners.
//!
//! ```no_run
//! use game_settings::{FloatSetting, IniFile, IniFileStore, SettingsRegistry};
//!
//! let mut registry = SettingsRegistry::new(IniFileStore::open_default());
//! let volume = FloatSetting::new(IniFile::GameUserSettings, "Audio", "MasterVolume", 0.0, 50.0, 100.0);
//! let id = registry.register_float(volume).setting.id;
//!
//! registry.subscribe_float(|event| println!("{} -> {}", event.setting, event.new_current));
//! registry.update_float(&id, 75.0);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod constants;
pub mod editor;
pub mod events;
pub mod facade;
pub mod logging;
pub mod manifest;
pub mod registry;
pub mod setting;
pub mod store;

pub use config::StoreConfig;
pub use editor::{FloatEditor, SettingEditor, TogglesEditor};
pub use events::{ChangeChannel, FloatSettingChanged, SubscriptionId, TogglesSettingChanged};
pub use facade::{SettingsContext, SettingsSession};
pub use manifest::{ManifestReport, SettingsManifest};
pub use registry::{Registration, Resolution, SettingsRegistry, UpdateOutcome};
pub use setting::{ActiveToggle, FloatSetting, IniFile, OpposingToggles, SettingId};
pub use store::{IniDocument, IniFileStore, MemoryStore, SettingsStore};
