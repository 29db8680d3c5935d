//! Access facade
//!
//! Free functions mirroring the setup/get/update pairs for each setting
//! kind. They only locate the registry through a [`SettingsContext`] and
//! collapse the detailed results into a success flag.

use crate::registry::SettingsRegistry;
use crate::setting::{FloatSetting, OpposingToggles, SettingId};
use crate::store::SettingsStore;

/// Anything that owns the registry for the current session
pub trait SettingsContext {
    type Store: SettingsStore;

    fn settings_registry(&self) -> &SettingsRegistry<Self::Store>;

    fn settings_registry_mut(&mut self) -> &mut SettingsRegistry<Self::Store>;
}

/// Default context: a session owning exactly one registry
#[derive(Debug)]
pub struct SettingsSession<S> {
    registry: SettingsRegistry<S>,
}

impl<S: SettingsStore> SettingsSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            registry: SettingsRegistry::new(store),
        }
    }

    /// Ends the session, handing back the store
    pub fn into_store(self) -> S {
        self.registry.into_store()
    }
}

impl<S: SettingsStore> SettingsContext for SettingsSession<S> {
    type Store = S;

    fn settings_registry(&self) -> &SettingsRegistry<S> {
        &self.registry
    }

    fn settings_registry_mut(&mut self) -> &mut SettingsRegistry<S> {
        &mut self.registry
    }
}

/// Registers `setting` and writes the reconciled value back into it
///
/// Returns false if the declared default was unusable or the key was
/// already registered. The setting is registered in both cases.
pub fn setup_float_setting<C: SettingsContext>(ctx: &mut C, setting: &mut FloatSetting) -> bool {
    let registration = ctx.settings_registry_mut().register_float(setting.clone());
    let success = registration.is_success();
    *setting = registration.setting;
    success
}

pub fn get_float_setting<C: SettingsContext>(ctx: &C, id: &SettingId) -> Option<FloatSetting> {
    ctx.settings_registry().get_float(id)
}

/// True only if the value changed
pub fn update_float_setting<C: SettingsContext>(ctx: &mut C, id: &SettingId, new_current: f32) -> bool {
    ctx.settings_registry_mut()
        .update_float(id, new_current)
        .is_applied()
}

/// Registers `setting` and writes the reconciled state back into it
///
/// Returns false only if the key was already registered.
pub fn setup_opposing_toggles_setting<C: SettingsContext>(ctx: &mut C, setting: &mut OpposingToggles) -> bool {
    let registration = ctx.settings_registry_mut().register_toggles(setting.clone());
    let success = registration.is_success();
    *setting = registration.setting;
    success
}

pub fn get_opposing_toggles_setting<C: SettingsContext>(ctx: &C, id: &SettingId) -> Option<OpposingToggles> {
    ctx.settings_registry().get_toggles(id)
}

/// True only if the active side changed
pub fn update_opposing_toggles_setting<C: SettingsContext>(ctx: &mut C, id: &SettingId, activate_first: bool) -> bool {
    ctx.settings_registry_mut()
        .update_toggles(id, activate_first)
        .is_applied()
}
