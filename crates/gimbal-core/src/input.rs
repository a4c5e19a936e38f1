//! Key-event source with scoped subscriptions
//!
//! [`KeyBus`] stands in for a process-wide key listener. Subscribers get a
//! [`KeySubscription`] guard back; dropping the guard (or calling
//! [`KeySubscription::unsubscribe`]) removes the listener, so a listener can
//! never outlive whatever it captured.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use uuid::Uuid;

/// Keys the gimbal cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Alt,
    Shift,
    Control,
    Escape,
    Character(char),
}

/// A single key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// true on key down, false on key up
    pub pressed: bool,
    /// Auto-repeat while the key is held
    pub repeat: bool,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            pressed: true,
            repeat: false,
        }
    }

    pub fn released(key: Key) -> Self {
        Self {
            key,
            pressed: false,
            repeat: false,
        }
    }

    /// A fresh (non-repeat) press of `key`
    pub fn is_press_of(&self, key: Key) -> bool {
        self.pressed && !self.repeat && self.key == key
    }
}

type KeyListener = Box<dyn FnMut(&KeyEvent)>;

#[derive(Default)]
struct KeyBusInner {
    listeners: Vec<(Uuid, KeyListener)>,
}

/// Broadcast source of key events
///
/// Listeners run synchronously inside [`KeyBus::dispatch`] and must not
/// subscribe or unsubscribe on the same bus from within the callback.
#[derive(Clone, Default)]
pub struct KeyBus {
    inner: Arc<Mutex<KeyBusInner>>,
}

impl KeyBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every dispatched event
    pub fn subscribe<F>(&self, listener: F) -> KeySubscription
    where
        F: FnMut(&KeyEvent) + 'static,
    {
        let id = Uuid::new_v4();
        self.inner.lock().listeners.push((id, Box::new(listener)));
        tracing::debug!("Key listener {} subscribed", id);

        KeySubscription {
            id,
            bus: Arc::downgrade(&self.inner),
            active: true,
        }
    }

    /// Deliver an event to every listener, returning how many were notified
    pub fn dispatch(&self, event: &KeyEvent) -> usize {
        let mut inner = self.inner.lock();
        for (_, listener) in inner.listeners.iter_mut() {
            listener(event);
        }
        inner.listeners.len()
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

/// Guard returned by [`KeyBus::subscribe`]
#[must_use = "dropping the subscription removes the listener immediately"]
pub struct KeySubscription {
    id: Uuid,
    bus: Weak<Mutex<KeyBusInner>>,
    active: bool,
}

impl KeySubscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active && self.bus.strong_count() > 0
    }

    /// Remove the listener now
    ///
    /// Returns false if the bus was already gone.
    pub fn unsubscribe(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;

        let Some(bus) = self.bus.upgrade() else {
            return false;
        };
        let mut inner = bus.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(id, _)| *id != self.id);
        let removed = inner.listeners.len() != before;
        if removed {
            tracing::debug!("Key listener {} unsubscribed", self.id);
        }
        removed
    }
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        self.release();
    }
}
