//! Change notification
//!
//! One channel per setting kind. Subscribers run synchronously, in the order
//! they subscribed, after the new value has been written to the store.

use serde::{Deserialize, Serialize};

use crate::setting::SettingId;

/// Sent after a float setting was updated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatSettingChanged {
    pub setting: SettingId,
    pub new_current: f32,
}

/// Sent after the active side of a toggle pair changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglesSettingChanged {
    pub setting: SettingId,
    pub first_is_active: bool,
}

/// Handle returned by `ChangeChannel::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<E> = Box<dyn FnMut(&E)>;

/// Ordered multicast of events of type `E`
pub struct ChangeChannel<E> {
    subscribers: Vec<(SubscriptionId, Subscriber<E>)>,
    next_id: u64,
}

impl<E> ChangeChannel<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Calls every subscriber before returning
    pub fn broadcast(&mut self, event: &E) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E> Default for ChangeChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for ChangeChannel<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeChannel")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
