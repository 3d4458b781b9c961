//! Provider session synchronization.
//!
//! The one component that writes provider events into the session
//! store. The subscription is long-lived and may fire at any time,
//! including while the auth modal has an unrelated call in flight; the
//! store applies every event as-is, last write wins.

use std::sync::Arc;

use plata_core::ports::IdentityProviderPort;
use plata_core::session::events::{ListenerId, SessionEvent};
use plata_core::SessionStore;

pub struct SessionSync {
    provider: Arc<dyn IdentityProviderPort>,
    listener: ListenerId,
}

impl SessionSync {
    /// Subscribe the store to the provider's session events. Dropping
    /// the returned handle deregisters the listener.
    pub fn attach(provider: Arc<dyn IdentityProviderPort>, session: Arc<SessionStore>) -> Self {
        let listener = provider.events().subscribe(move |event| {
            let SessionEvent::Changed(update) = event;
            session.apply_provider(update.clone());
        });
        Self { provider, listener }
    }
}

impl Drop for SessionSync {
    fn drop(&mut self) {
        self.provider.events().unsubscribe(self.listener);
    }
}
