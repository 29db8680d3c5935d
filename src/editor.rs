//! Headless editing state for settings widgets
//!
//! A menu typically lets the user move a slider or flip a toggle, then apply
//! or revert. The editors here track the pending value next to the last
//! applied descriptor so any frontend can drive them.

use crate::registry::{SettingsRegistry, UpdateOutcome};
use crate::setting::{ActiveToggle, FloatSetting, OpposingToggles, SettingId};
use crate::store::SettingsStore;

/// Behaviour every settings widget is expected to offer
pub trait SettingEditor {
    /// Sets the pending value to the declared default
    fn reset_to_default(&mut self);

    /// Discards the pending value
    fn reset_to_last_applied(&mut self);

    /// Marks the pending value as applied
    fn setting_applied(&mut self);

    fn is_setting_default(&self) -> bool;

    /// Pending value differs from the last applied one
    fn did_setting_change(&self) -> bool;
}

/// Slider-style editor for a float setting
#[derive(Debug, Clone, PartialEq)]
pub struct FloatEditor {
    applied: FloatSetting,
    pending: f32,
}

impl FloatEditor {
    /// Starts from the registered state, `None` if `id` is not registered
    pub fn new<S: SettingsStore>(registry: &SettingsRegistry<S>, id: &SettingId) -> Option<Self> {
        let applied = registry.get_float(id)?;
        Some(Self {
            pending: applied.current,
            applied,
        })
    }

    pub fn pending(&self) -> f32 {
        self.pending
    }

    pub fn applied(&self) -> &FloatSetting {
        &self.applied
    }

    /// Stores `value` clamped into the setting's bounds, NaN is ignored
    pub fn set_pending(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        let setting = &self.applied;
        self.pending = if setting.min <= setting.max {
            value.clamp(setting.min, setting.max)
        } else {
            setting.fallback_value()
        };
    }

    /// Pushes the pending value to the registry
    pub fn apply<S: SettingsStore>(&mut self, registry: &mut SettingsRegistry<S>) -> UpdateOutcome {
        let outcome = registry.update_float(&self.applied.id, self.pending);
        if outcome.is_applied() {
            self.setting_applied();
        }
        outcome
    }
}

impl SettingEditor for FloatEditor {
    fn reset_to_default(&mut self) {
        self.pending = self.applied.default;
    }

    fn reset_to_last_applied(&mut self) {
        self.pending = self.applied.current;
    }

    fn setting_applied(&mut self) {
        self.applied.current = self.pending;
    }

    fn is_setting_default(&self) -> bool {
        self.pending == self.applied.default
    }

    fn did_setting_change(&self) -> bool {
        self.pending != self.applied.current
    }
}

/// Two-button editor for an opposing toggles setting
#[derive(Debug, Clone, PartialEq)]
pub struct TogglesEditor {
    applied: OpposingToggles,
    pending: ActiveToggle,
}

impl TogglesEditor {
    pub fn new<S: SettingsStore>(registry: &SettingsRegistry<S>, id: &SettingId) -> Option<Self> {
        let applied = registry.get_toggles(id)?;
        Some(Self {
            pending: applied.active,
            applied,
        })
    }

    pub fn pending(&self) -> ActiveToggle {
        self.pending
    }

    pub fn pending_label(&self) -> &str {
        self.applied.label(self.pending)
    }

    pub fn applied(&self) -> &OpposingToggles {
        &self.applied
    }

    pub fn select(&mut self, side: ActiveToggle) {
        self.pending = side;
    }

    pub fn flip(&mut self) {
        self.pending = self.pending.opposite();
    }

    pub fn apply<S: SettingsStore>(&mut self, registry: &mut SettingsRegistry<S>) -> UpdateOutcome {
        let outcome = registry.update_toggles(&self.applied.id, self.pending.is_first());
        if outcome.is_applied() {
            self.setting_applied();
        }
        outcome
    }
}

impl SettingEditor for TogglesEditor {
    fn reset_to_default(&mut self) {
        self.pending = self.applied.default_side();
    }

    fn reset_to_last_applied(&mut self) {
        self.pending = self.applied.active;
    }

    fn setting_applied(&mut self) {
        self.applied.active = self.pending;
    }

    fn is_setting_default(&self) -> bool {
        self.pending == self.applied.default_side()
    }

    fn did_setting_change(&self) -> bool {
        self.pending != self.applied.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setting::IniFile;
    use crate::store::MemoryStore;

    fn registry_with_settings() -> (SettingsRegistry<MemoryStore>, SettingId, SettingId) {
        let mut registry = SettingsRegistry::new(MemoryStore::new());
        let volume = registry
            .register_float(FloatSetting::new(IniFile::GameUserSettings, "Audio", "Music", 0.0, 0.8, 1.0))
            .setting
            .id;
        let vsync = registry
            .register_toggles(OpposingToggles::new(IniFile::GameUserSettings, "Video", "VSync", "On", "Off", true))
            .setting
            .id;
        (registry, volume, vsync)
    }

    #[test]
    fn test_editor_requires_registration() {
        let registry = SettingsRegistry::new(MemoryStore::new());
        let id = SettingId::new(IniFile::Game, "Audio", "Music");
        assert!(FloatEditor::new(&registry, &id).is_none());
        assert!(TogglesEditor::new(&registry, &id).is_none());
    }

    #[test]
    fn test_float_editor_tracks_changes() {
        let (mut registry, id, _) = registry_with_settings();
        let mut editor = FloatEditor::new(&registry, &id).unwrap();
        assert!(editor.is_setting_default());
        assert!(!editor.did_setting_change());

        editor.set_pending(0.3);
        assert!(editor.did_setting_change());
        assert!(!editor.is_setting_default());

        assert_eq!(editor.apply(&mut registry), UpdateOutcome::Applied);
        assert!(!editor.did_setting_change());
        assert_eq!(registry.get_float(&id).unwrap().current, 0.3);
    }

    #[test]
    fn test_float_editor_clamps_pending() {
        let (registry, id, _) = registry_with_settings();
        let mut editor = FloatEditor::new(&registry, &id).unwrap();

        editor.set_pending(5.0);
        assert_eq!(editor.pending(), 1.0);
        editor.set_pending(-5.0);
        assert_eq!(editor.pending(), 0.0);
        editor.set_pending(f32::NAN);
        assert_eq!(editor.pending(), 0.0);
    }

    #[test]
    fn test_float_editor_resets() {
        let (mut registry, id, _) = registry_with_settings();
        let mut editor = FloatEditor::new(&registry, &id).unwrap();
        editor.set_pending(0.5);
        editor.apply(&mut registry);

        editor.set_pending(0.1);
        editor.reset_to_last_applied();
        assert_eq!(editor.pending(), 0.5);

        editor.reset_to_default();
        assert_eq!(editor.pending(), 0.8);
        assert!(editor.did_setting_change());
    }

    #[test]
    fn test_float_editor_apply_without_change() {
        let (mut registry, id, _) = registry_with_settings();
        let mut editor = FloatEditor::new(&registry, &id).unwrap();
        assert_eq!(editor.apply(&mut registry), UpdateOutcome::Unchanged);
    }

    #[test]
    fn test_toggles_editor_flip_and_apply() {
        let (mut registry, _, id) = registry_with_settings();
        let mut editor = TogglesEditor::new(&registry, &id).unwrap();
        assert_eq!(editor.pending_label(), "On");

        editor.flip();
        assert!(editor.did_setting_change());
        assert!(!editor.is_setting_default());
        assert_eq!(editor.pending_label(), "Off");

        assert_eq!(editor.apply(&mut registry), UpdateOutcome::Applied);
        assert!(!editor.did_setting_change());
        assert!(!registry.get_toggles(&id).unwrap().first_is_active());
    }

    #[test]
    fn test_toggles_editor_resets() {
        let (registry, _, id) = registry_with_settings();
        let mut editor = TogglesEditor::new(&registry, &id).unwrap();

        editor.select(ActiveToggle::Second);
        editor.reset_to_last_applied();
        assert_eq!(editor.pending(), ActiveToggle::First);

        editor.select(ActiveToggle::Second);
        editor.reset_to_default();
        assert!(editor.is_setting_default());
        assert!(!editor.did_setting_change());
    }
}
