use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{IniFile, SettingId};
use crate::constants::toggles as sentinel;

/// Which side of a toggle pair is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveToggle {
    First,
    Second,
}

impl ActiveToggle {
    pub fn from_first_is_active(first_is_active: bool) -> Self {
        if first_is_active {
            ActiveToggle::First
        } else {
            ActiveToggle::Second
        }
    }

    pub fn is_first(&self) -> bool {
        matches!(self, ActiveToggle::First)
    }

    pub fn opposite(&self) -> Self {
        match self {
            ActiveToggle::First => ActiveToggle::Second,
            ActiveToggle::Second => ActiveToggle::First,
        }
    }
}

/// Two named choices where activating one always deactivates the other
///
/// Stored in the ini file as the lower-cased label of the active side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpposingToggles {
    #[serde(flatten)]
    pub id: SettingId,
    pub first: String,
    pub second: String,
    pub first_is_default: bool,
    /// Initialized from the ini file, or from `first_is_default` if absent or unrecognized
    pub active: ActiveToggle,
}

impl OpposingToggles {
    /// Builds a toggle pair, replacing unusable labels with sentinel names
    ///
    /// Labels are trimmed, as stored values are. An empty label, or a second
    /// label equal to the first (ignoring case), would make the stored value
    /// ambiguous. Those are swapped for fixed marker strings so the problem
    /// shows up in the ini file instead of failing construction.
    pub fn new(
        file: IniFile,
        section: impl Into<String>,
        key: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
        first_is_default: bool,
    ) -> Self {
        let id = SettingId::new(file, section, key);
        let mut first = first.into().trim().to_string();
        let mut second = second.into().trim().to_string();

        if first.is_empty() {
            warn!(setting = %id, "First toggle label is empty, using sentinel");
            first = sentinel::FIRST_EMPTY.to_string();
        }

        if second.is_empty() {
            warn!(setting = %id, "Second toggle label is empty, using sentinel");
            second = sentinel::SECOND_EMPTY.to_string();
        } else if second.to_lowercase() == first.to_lowercase() {
            warn!(setting = %id, label = %second, "Second toggle label matches the first, using sentinel");
            second = sentinel::SECOND_MATCHES_FIRST.to_string();
        }

        Self {
            id,
            first,
            second,
            first_is_default,
            active: ActiveToggle::from_first_is_active(first_is_default),
        }
    }

    /// Matches a stored string against both labels, ignoring case
    pub fn parse(&self, stored: &str) -> Option<ActiveToggle> {
        let stored = stored.trim().to_lowercase();
        if stored == self.first.to_lowercase() {
            Some(ActiveToggle::First)
        } else if stored == self.second.to_lowercase() {
            Some(ActiveToggle::Second)
        } else {
            None
        }
    }

    pub fn label(&self, side: ActiveToggle) -> &str {
        match side {
            ActiveToggle::First => &self.first,
            ActiveToggle::Second => &self.second,
        }
    }

    /// Label as written to the ini file
    pub fn stored_label(&self, side: ActiveToggle) -> String {
        self.label(side).to_lowercase()
    }

    pub fn default_side(&self) -> ActiveToggle {
        ActiveToggle::from_first_is_active(self.first_is_default)
    }

    pub fn first_is_active(&self) -> bool {
        self.active.is_first()
    }

    pub fn active_label(&self) -> &str {
        self.label(self.active)
    }

    pub fn is_default(&self) -> bool {
        self.active == self.default_side()
    }

    pub fn registry_key(&self) -> String {
        self.id.registry_key()
    }
}
