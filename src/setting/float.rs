use serde::{Deserialize, Serialize};

use super::{IniFile, SettingId};

/// Setting whose value must stay within `[min, max]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatSetting {
    #[serde(flatten)]
    pub id: SettingId,
    pub min: f32,
    /// Value read from (or written to) the ini file
    pub current: f32,
    /// Used when the ini file is missing the key or holds an out of range value
    pub default: f32,
    pub max: f32,
}

impl FloatSetting {
    /// Current starts out equal to the default until registration reconciles it
    pub fn new(
        file: IniFile,
        section: impl Into<String>,
        key: impl Into<String>,
        min: f32,
        default_and_current: f32,
        max: f32,
    ) -> Self {
        Self {
            id: SettingId::new(file, section, key),
            min,
            current: default_and_current,
            default: default_and_current,
            max,
        }
    }

    /// True if `value` lies within `[min, max]`. NaN is never valid.
    pub fn is_valid_value(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn has_valid_default(&self) -> bool {
        self.is_valid_value(self.default)
    }

    /// Value used when nothing usable is stored
    ///
    /// The declared default if it is within bounds, otherwise zero pulled into
    /// `[min, max]`. Bounds with `min > max` cannot hold any value and yield zero.
    pub fn fallback_value(&self) -> f32 {
        if self.has_valid_default() {
            self.default
        } else if self.min <= self.max {
            0.0_f32.clamp(self.min, self.max)
        } else {
            0.0
        }
    }

    pub fn is_default(&self) -> bool {
        self.current == self.default
    }

    pub fn registry_key(&self) -> String {
        self.id.registry_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(min: f32, default: f32, max: f32) -> FloatSetting {
        FloatSetting::new(IniFile::GameUserSettings, "Audio", "Volume", min, default, max)
    }

    #[test]
    fn test_new_sets_current_to_default() {
        let setting = volume(0.0, 50.0, 100.0);
        assert_eq!(setting.current, 50.0);
        assert_eq!(setting.default, 50.0);
        assert!(setting.is_default());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let setting = volume(0.0, 50.0, 100.0);
        assert!(setting.is_valid_value(0.0));
        assert!(setting.is_valid_value(100.0));
        assert!(!setting.is_valid_value(-0.1));
        assert!(!setting.is_valid_value(100.1));
    }

    #[test]
    fn test_nan_is_never_valid() {
        let setting = volume(0.0, 50.0, 100.0);
        assert!(!setting.is_valid_value(f32::NAN));
    }

    #[test]
    fn test_fallback_uses_valid_default() {
        assert_eq!(volume(0.0, 25.0, 100.0).fallback_value(), 25.0);
    }

    #[test]
    fn test_fallback_zero_when_default_out_of_range() {
        assert_eq!(volume(-10.0, 500.0, 10.0).fallback_value(), 0.0);
    }

    #[test]
    fn test_fallback_zero_pulled_into_bounds() {
        // Zero is below the range, so the minimum is the closest usable value
        assert_eq!(volume(10.0, 500.0, 20.0).fallback_value(), 10.0);
        assert_eq!(volume(-20.0, 500.0, -10.0).fallback_value(), -10.0);
    }

    #[test]
    fn test_fallback_with_inverted_bounds() {
        assert_eq!(volume(100.0, 50.0, 0.0).fallback_value(), 0.0);
    }
}
