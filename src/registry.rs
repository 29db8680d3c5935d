//! Setting registry
//!
//! Holds the live value of every registered setting and keeps it in sync with
//! the backing store. Registration reconciles a descriptor with what is
//! stored, updates are validated, written through and broadcast.
//!
//! Nothing here returns an error. Every failure falls back to a safe value or
//! leaves state untouched, logs, and is reported through the return value.

use std::collections::HashMap;
use tracing::{debug, error, info, warn};

use crate::events::{ChangeChannel, FloatSettingChanged, SubscriptionId, TogglesSettingChanged};
use crate::setting::{ActiveToggle, FloatSetting, OpposingToggles, SettingId};
use crate::store::SettingsStore;

/// Where a registered value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Usable value found in the store
    Stored,
    /// Store was missing the key or held an unusable value, the declared default was written
    Defaulted,
    /// Declared default was out of bounds too, the zero fallback was written
    Misconfigured,
}

/// Result of registering a descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Registration<T> {
    /// Descriptor as stored in the registry after reconciliation
    pub setting: T,
    pub resolution: Resolution,
    /// An earlier registration under the same key was evicted
    pub replaced: bool,
    /// False only if writing the resolved value back to the store failed
    pub persisted: bool,
}

impl<T> Registration<T> {
    /// The resolved value satisfies the descriptor's own declaration
    pub fn is_value_valid(&self) -> bool {
        self.resolution != Resolution::Misconfigured
    }

    /// Valid value and no key conflict
    pub fn is_success(&self) -> bool {
        self.is_value_valid() && !self.replaced
    }
}

/// Result of an update request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Value written, registry updated, subscribers notified
    Applied,
    /// Requested value equals the current one
    Unchanged,
    /// Requested float is outside `[min, max]`
    OutOfRange,
    /// No setting registered under this identity
    Unregistered,
    /// The store rejected the write
    StoreFailed,
}

impl UpdateOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied)
    }
}

/// Live settings for one session
pub struct SettingsRegistry<S> {
    store: S,
    floats: HashMap<String, FloatSetting>,
    toggles: HashMap<String, OpposingToggles>,
    float_changed: ChangeChannel<FloatSettingChanged>,
    toggles_changed: ChangeChannel<TogglesSettingChanged>,
}

impl<S: SettingsStore> SettingsRegistry<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            floats: HashMap::new(),
            toggles: HashMap::new(),
            float_changed: ChangeChannel::new(),
            toggles_changed: ChangeChannel::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gives back the store, dropping all registrations
    pub fn into_store(self) -> S {
        self.store
    }

    // ==========================================================================
    // Float settings
    // ==========================================================================

    /// Reconciles `setting` with the store and registers it
    ///
    /// A stored value within bounds becomes `current`. Otherwise the fallback
    /// value is written back and flushed. Registering a key twice replaces the
    /// earlier descriptor.
    pub fn register_float(&mut self, mut setting: FloatSetting) -> Registration<FloatSetting> {
        let key = setting.registry_key();
        let stored = self
            .store
            .read_float(setting.id.file, &setting.id.section, &setting.id.key);

        let (resolution, persisted) = match stored {
            Some(value) if setting.is_valid_value(value) => {
                setting.current = value;
                (Resolution::Stored, true)
            }
            _ => {
                let resolution = if setting.has_valid_default() {
                    Resolution::Defaulted
                } else {
                    error!(
                        key = %key,
                        min = setting.min,
                        default = setting.default,
                        max = setting.max,
                        fallback = setting.fallback_value(),
                        "Default was not within min and max, using fallback"
                    );
                    Resolution::Misconfigured
                };

                match stored {
                    Some(value) => warn!(key = %key, stored = value, "Stored value out of range, overwriting"),
                    None => info!(key = %key, "No usable stored value, writing default"),
                }

                let fallback = setting.fallback_value();
                setting.current = fallback;
                setting.default = fallback;

                let persisted = self.persist_float(&setting.id, fallback);
                (resolution, persisted)
            }
        };

        let replaced = self.floats.insert(key.clone(), setting.clone()).is_some();
        if replaced {
            warn!(key = %key, "Float setting was already registered, replacing");
        }

        Registration {
            setting,
            resolution,
            replaced,
            persisted,
        }
    }

    /// Copy of the registered descriptor
    pub fn get_float(&self, id: &SettingId) -> Option<FloatSetting> {
        self.floats.get(&id.registry_key()).cloned()
    }

    pub fn contains_float(&self, id: &SettingId) -> bool {
        self.floats.contains_key(&id.registry_key())
    }

    /// Validates, persists and broadcasts a new current value
    pub fn update_float(&mut self, id: &SettingId, new_current: f32) -> UpdateOutcome {
        let key = id.registry_key();

        let Some(setting) = self.floats.get(&key) else {
            warn!(key = %key, "Update called on a float setting that was never registered");
            return UpdateOutcome::Unregistered;
        };

        if !setting.is_valid_value(new_current) {
            warn!(
                key = %key,
                value = new_current,
                min = setting.min,
                max = setting.max,
                "Update value outside min and max, nothing changed"
            );
            return UpdateOutcome::OutOfRange;
        }

        if setting.current == new_current {
            return UpdateOutcome::Unchanged;
        }

        let setting_id = setting.id.clone();
        if !self.persist_float(&setting_id, new_current) {
            return UpdateOutcome::StoreFailed;
        }

        if let Some(setting) = self.floats.get_mut(&key) {
            setting.current = new_current;
        }
        debug!(key = %key, value = new_current, "Float setting updated");

        self.float_changed.broadcast(&FloatSettingChanged {
            setting: setting_id,
            new_current,
        });
        UpdateOutcome::Applied
    }

    pub fn subscribe_float(&mut self, subscriber: impl FnMut(&FloatSettingChanged) + 'static) -> SubscriptionId {
        self.float_changed.subscribe(subscriber)
    }

    pub fn unsubscribe_float(&mut self, id: SubscriptionId) -> bool {
        self.float_changed.unsubscribe(id)
    }

    // ==========================================================================
    // Opposing toggles
    // ==========================================================================

    /// Reconciles `setting` with the store and registers it
    ///
    /// The stored string is matched against both labels ignoring case. No
    /// match (or nothing stored) activates the default side and writes its
    /// lower-cased label back.
    pub fn register_toggles(&mut self, mut setting: OpposingToggles) -> Registration<OpposingToggles> {
        let key = setting.registry_key();
        let stored = self
            .store
            .read_string(setting.id.file, &setting.id.section, &setting.id.key);

        let (resolution, persisted) = match stored.as_deref().and_then(|value| setting.parse(value)) {
            Some(side) => {
                setting.active = side;
                (Resolution::Stored, true)
            }
            None => {
                warn!(
                    key = %key,
                    stored = ?stored,
                    "Stored toggle did not match either label or was missing, writing default"
                );
                let side = setting.default_side();
                setting.active = side;

                let label = setting.stored_label(side);
                let persisted = self.persist_label(&setting.id, &label);
                (Resolution::Defaulted, persisted)
            }
        };

        let replaced = self.toggles.insert(key.clone(), setting.clone()).is_some();
        if replaced {
            warn!(key = %key, "Opposing toggles setting was already registered, replacing");
        }

        Registration {
            setting,
            resolution,
            replaced,
            persisted,
        }
    }

    /// Copy of the registered descriptor
    pub fn get_toggles(&self, id: &SettingId) -> Option<OpposingToggles> {
        self.toggles.get(&id.registry_key()).cloned()
    }

    pub fn contains_toggles(&self, id: &SettingId) -> bool {
        self.toggles.contains_key(&id.registry_key())
    }

    /// Switches the active side, persisting and broadcasting the change
    pub fn update_toggles(&mut self, id: &SettingId, activate_first: bool) -> UpdateOutcome {
        let key = id.registry_key();
        let side = ActiveToggle::from_first_is_active(activate_first);

        let Some(setting) = self.toggles.get(&key) else {
            warn!(key = %key, "Update called on an opposing toggles setting that was never registered");
            return UpdateOutcome::Unregistered;
        };

        if setting.active == side {
            return UpdateOutcome::Unchanged;
        }

        let setting_id = setting.id.clone();
        let label = setting.stored_label(side);
        if !self.persist_label(&setting_id, &label) {
            return UpdateOutcome::StoreFailed;
        }

        if let Some(setting) = self.toggles.get_mut(&key) {
            setting.active = side;
        }
        debug!(key = %key, active = %label, "Opposing toggles setting updated");

        self.toggles_changed.broadcast(&TogglesSettingChanged {
            setting: setting_id,
            first_is_active: activate_first,
        });
        UpdateOutcome::Applied
    }

    pub fn subscribe_toggles(&mut self, subscriber: impl FnMut(&TogglesSettingChanged) + 'static) -> SubscriptionId {
        self.toggles_changed.subscribe(subscriber)
    }

    pub fn unsubscribe_toggles(&mut self, id: SubscriptionId) -> bool {
        self.toggles_changed.unsubscribe(id)
    }

    // ==========================================================================
    // Shared
    // ==========================================================================

    /// Number of registered settings of both kinds
    pub fn len(&self) -> usize {
        self.floats.len() + self.toggles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floats.is_empty() && self.toggles.is_empty()
    }

    /// Write + flush; logs and returns false on failure
    fn persist_float(&mut self, id: &SettingId, value: f32) -> bool {
        let result = self
            .store
            .write_float(id.file, &id.section, &id.key, value)
            .and_then(|()| self.store.flush(id.file));

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(setting = %id, value, error = %e, "Failed to persist float setting");
                false
            }
        }
    }

    fn persist_label(&mut self, id: &SettingId, label: &str) -> bool {
        let result = self
            .store
            .write_string(id.file, &id.section, &id.key, label)
            .and_then(|()| self.store.flush(id.file));

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(setting = %id, label, error = %e, "Failed to persist toggle setting");
                false
            }
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for SettingsRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsRegistry")
            .field("store", &self.store)
            .field("floats", &self.floats)
            .field("toggles", &self.toggles)
            .field("float_changed", &self.float_changed)
            .field("toggles_changed", &self.toggles_changed)
            .finish()
    }
}
