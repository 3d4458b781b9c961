//! Session state: the single source of truth for gating decisions.

pub mod events;

use std::sync::Mutex;

use thiserror::Error;

use crate::identity::{Identity, ProviderIdentity};

/// Current authentication state of the app instance.
///
/// An unverified principal is held in `Pending` and is never exposed as
/// the signed-in identity: the product stays locked until the email is
/// verified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    SignedOut,
    /// Authenticated against the provider but email not yet verified.
    Pending(Identity),
    SignedIn(Identity),
}

impl SessionState {
    fn premium(&self) -> bool {
        match self {
            Self::SignedOut => false,
            Self::Pending(id) | Self::SignedIn(id) => id.premium,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("not authenticated")]
    NotAuthenticated,
}

/// Process-wide holder of the current identity.
///
/// Mutation discipline: the provider subscription callback calls
/// `apply_provider` and the checkout flow calls `upgrade`; every other
/// component is a read-only observer. Last write wins, no queueing.
#[derive(Default)]
pub struct SessionStore {
    state: Mutex<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The signed-in identity, if any. `Pending` principals are absent.
    pub fn current(&self) -> Option<Identity> {
        match &*self.state.lock().unwrap() {
            SessionState::SignedIn(id) => Some(id.clone()),
            _ => None,
        }
    }

    /// The authenticated-but-unverified principal, if any.
    pub fn pending(&self) -> Option<Identity> {
        match &*self.state.lock().unwrap() {
            SessionState::Pending(id) => Some(id.clone()),
            _ => None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    /// Apply a provider session event. Premium is seeded from the
    /// previous in-memory state, never from the provider; `None` clears
    /// to signed-out.
    pub fn apply_provider(&self, update: Option<ProviderIdentity>) {
        let mut state = self.state.lock().unwrap();
        *state = match update {
            None => SessionState::SignedOut,
            Some(report) => {
                let identity = Identity::from_provider(report, state.premium());
                if identity.verified {
                    SessionState::SignedIn(identity)
                } else {
                    SessionState::Pending(identity)
                }
            }
        };
    }

    /// Mark the signed-in identity premium.
    ///
    /// Entitlement lives in volatile session memory only; a trusted
    /// backend record keyed by identity should replace this (see
    /// DESIGN.md).
    pub fn upgrade(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock().unwrap();
        match &mut *state {
            SessionState::SignedIn(id) => {
                id.premium = true;
                Ok(())
            }
            _ => Err(SessionError::NotAuthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(token: &str, verified: bool) -> ProviderIdentity {
        ProviderIdentity {
            display_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            token: token.to_string(),
            verified,
        }
    }

    #[test]
    fn test_starts_signed_out() {
        let store = SessionStore::new();
        assert_eq!(store.state(), SessionState::SignedOut);
        assert!(store.current().is_none());
        assert!(store.pending().is_none());
    }

    #[test]
    fn test_unverified_principal_is_pending_not_signed_in() {
        let store = SessionStore::new();
        store.apply_provider(Some(report("tok-1", false)));

        assert!(store.current().is_none());
        let pending = store.pending().unwrap();
        assert!(!pending.verified);
    }

    #[test]
    fn test_verified_principal_is_signed_in() {
        let store = SessionStore::new();
        store.apply_provider(Some(report("tok-1", true)));

        assert!(store.pending().is_none());
        let identity = store.current().unwrap();
        assert!(identity.verified);
        assert!(!identity.premium);
    }

    #[test]
    fn test_premium_survives_token_refresh() {
        let store = SessionStore::new();
        store.apply_provider(Some(report("tok-1", true)));
        store.upgrade().unwrap();

        // Provider refreshes the token; premium is seeded from memory.
        store.apply_provider(Some(report("tok-2", true)));

        let identity = store.current().unwrap();
        assert_eq!(identity.token, "tok-2");
        assert!(identity.premium);
    }

    #[test]
    fn test_premium_lost_on_sign_out() {
        let store = SessionStore::new();
        store.apply_provider(Some(report("tok-1", true)));
        store.upgrade().unwrap();

        store.apply_provider(None);
        assert_eq!(store.state(), SessionState::SignedOut);

        store.apply_provider(Some(report("tok-3", true)));
        assert!(!store.current().unwrap().premium);
    }

    #[test]
    fn test_upgrade_without_identity_fails_and_leaves_state_unchanged() {
        let store = SessionStore::new();
        assert_eq!(store.upgrade(), Err(SessionError::NotAuthenticated));
        assert_eq!(store.state(), SessionState::SignedOut);
    }

    #[test]
    fn test_upgrade_on_pending_principal_fails() {
        let store = SessionStore::new();
        store.apply_provider(Some(report("tok-1", false)));
        assert_eq!(store.upgrade(), Err(SessionError::NotAuthenticated));
        assert!(!store.pending().unwrap().premium);
    }

    #[test]
    fn test_last_write_wins() {
        let store = SessionStore::new();
        store.apply_provider(Some(report("tok-1", true)));
        store.apply_provider(Some(report("tok-2", true)));
        assert_eq!(store.current().unwrap().token, "tok-2");
    }
}
