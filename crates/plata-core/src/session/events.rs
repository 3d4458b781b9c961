//! Session event hub.
//!
//! An explicit observable over provider-side session changes, so the
//! app reacts to sign-in, sign-out and token refresh without polling,
//! and tests can fire events synchronously without network I/O.

use std::sync::{Arc, Mutex, RwLock};

use crate::identity::ProviderIdentity;

/// A provider-side session change. `None` means signed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Changed(Option<ProviderIdentity>),
}

/// Handle for deregistering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Registry of session listeners with synchronous dispatch.
#[derive(Default)]
pub struct SessionEventHub {
    listeners: RwLock<Vec<(ListenerId, Listener)>>,
    next_listener_id: Mutex<usize>,
}

impl SessionEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it fires on every subsequent publish until
    /// deregistered.
    pub fn subscribe<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let id = {
            let mut id_guard = self.next_listener_id.lock().unwrap();
            let id = ListenerId(*id_guard);
            *id_guard += 1;
            id
        };
        self.listeners
            .write()
            .unwrap()
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a listener. Returns false when the id was already gone.
    /// No callbacks are delivered after this returns.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() < before
    }

    /// Notify every registered listener. Listeners are cloned out of the
    /// registry first so a callback may subscribe or unsubscribe without
    /// deadlocking.
    pub fn publish(&self, event: SessionEvent) {
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }
}
