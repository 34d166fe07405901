//! Change notifications
//!
//! Observers register a callback and get back a [`Subscription`]. Dropping the
//! subscription (or calling [`Subscription::unsubscribe`]) removes the callback.
//! Delivery is synchronous, on whichever thread calls [`Observers::notify`].

use crate::constants::notify::LOCATIONS_UPDATED;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::trace;

/// Named change events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// The saved point collection changed
    LocationsUpdated,
}

impl Notification {
    pub fn name(&self) -> &'static str {
        match self {
            Notification::LocationsUpdated => LOCATIONS_UPDATED,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

type Callback = Arc<dyn Fn(Notification) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: Vec<(u64, Callback)>,
}

/// Observer registry
#[derive(Clone, Default)]
pub struct Observers {
    inner: Arc<Mutex<Registry>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it stays registered while the returned
    /// subscription is alive
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Notification) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.push((id, Arc::new(callback)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver a notification to every observer registered right now.
    ///
    /// The registry lock is released before callbacks run, so a callback may
    /// subscribe or unsubscribe without deadlocking.
    pub fn notify(&self, notification: Notification) {
        let callbacks: Vec<Callback> = lock(&self.inner)
            .callbacks
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        trace!(%notification, observers = callbacks.len(), "notifying");
        for callback in callbacks {
            callback(notification);
        }
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        lock(&self.inner).callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").field("count", &self.len()).finish()
    }
}

/// Handle keeping one observer registered
#[derive(Debug)]
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Remove the observer now
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).callbacks.retain(|(id, _)| *id != self.id);
        }
    }
}

// A panicking observer must not wedge the registry for everyone else.
fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
