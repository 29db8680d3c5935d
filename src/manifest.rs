//! Settings declared in a JSON file
//!
//! Lets a game list its settings as data instead of constructing every
//! descriptor in code:
//!
//! ```json
//! {
//!   "floats": [
//!     { "file": "GameUserSettings", "section": "Audio", "key": "Music",
//!       "min": 0.0, "default": 0.8, "max": 1.0 }
//!   ],
//!   "toggles": [
//!     { "file": "GameUserSettings", "section": "Video", "key": "VSync",
//!       "first": "On", "second": "Off", "first_is_default": true }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::registry::{Resolution, SettingsRegistry};
use crate::setting::{FloatSetting, OpposingToggles, SettingId};
use crate::store::SettingsStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatDecl {
    #[serde(flatten)]
    pub id: SettingId,
    pub min: f32,
    pub default: f32,
    pub max: f32,
}

impl FloatDecl {
    pub fn to_setting(&self) -> FloatSetting {
        FloatSetting::new(
            self.id.file,
            self.id.section.clone(),
            self.id.key.clone(),
            self.min,
            self.default,
            self.max,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TogglesDecl {
    #[serde(flatten)]
    pub id: SettingId,
    pub first: String,
    pub second: String,
    #[serde(default = "default_first_is_default")]
    pub first_is_default: bool,
}

fn default_first_is_default() -> bool {
    true
}

impl TogglesDecl {
    /// Goes through the constructor so unusable labels get replaced
    pub fn to_setting(&self) -> OpposingToggles {
        OpposingToggles::new(
            self.id.file,
            self.id.section.clone(),
            self.id.key.clone(),
            self.first.clone(),
            self.second.clone(),
            self.first_is_default,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsManifest {
    #[serde(default)]
    pub floats: Vec<FloatDecl>,
    #[serde(default)]
    pub toggles: Vec<TogglesDecl>,
}

/// Summary of `SettingsManifest::register_all`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestReport {
    pub registered: usize,
    /// Settings whose stored value was missing or unusable
    pub defaulted: usize,
    /// Registry keys of floats declared with a default outside their bounds
    pub misconfigured: Vec<String>,
    /// Registry keys registered more than once
    pub replaced: Vec<String>,
}

impl ManifestReport {
    pub fn is_clean(&self) -> bool {
        self.misconfigured.is_empty() && self.replaced.is_empty()
    }

    fn record(&mut self, key: String, resolution: Resolution, replaced: bool) {
        self.registered += 1;
        match resolution {
            Resolution::Stored => {}
            Resolution::Defaulted => self.defaulted += 1,
            Resolution::Misconfigured => self.misconfigured.push(key.clone()),
        }
        if replaced {
            self.replaced.push(key);
        }
    }
}

impl SettingsManifest {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse settings manifest JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings manifest from {:?}", path))?;
        let manifest = Self::from_json(&contents)
            .with_context(|| format!("Invalid settings manifest {:?}", path))?;

        info!(
            path = %path.display(),
            floats = manifest.floats.len(),
            toggles = manifest.toggles.len(),
            "Loaded settings manifest"
        );
        Ok(manifest)
    }

    pub fn len(&self) -> usize {
        self.floats.len() + self.toggles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floats.is_empty() && self.toggles.is_empty()
    }

    /// Registers every declaration in order, floats first
    pub fn register_all<S: SettingsStore>(&self, registry: &mut SettingsRegistry<S>) -> ManifestReport {
        let mut report = ManifestReport::default();

        for decl in &self.floats {
            let registration = registry.register_float(decl.to_setting());
            report.record(registration.setting.registry_key(), registration.resolution, registration.replaced);
        }

        for decl in &self.toggles {
            let registration = registry.register_toggles(decl.to_setting());
            report.record(registration.setting.registry_key(), registration.resolution, registration.replaced);
        }

        if !report.is_clean() {
            warn!(
                misconfigured = ?report.misconfigured,
                replaced = ?report.replaced,
                "Settings manifest registered with problems"
            );
        }
        report
    }
}
