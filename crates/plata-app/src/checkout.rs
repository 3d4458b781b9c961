//! Subscription checkout flow.
//!
//! Captures upgrade intent, runs one charge round-trip through the
//! payment gateway and, on success, flips the session entitlement. The
//! gateway can decline or time out; failures surface inline and the
//! offer stays open for a retry.

use std::sync::Arc;

use tokio::sync::Mutex;

use plata_core::ports::PaymentGatewayPort;
use plata_core::{ProviderError, SessionStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CheckoutState {
    pub open: bool,
    /// A charge is in flight; the purchase control is disabled.
    pub processing: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Entitlement granted and the offer closed.
    Upgraded,
    /// Gateway or session failure; inline error, offer stays open.
    Failed,
    /// A charge was already in flight; this call was ignored.
    AlreadyProcessing,
}

pub struct CheckoutFlow {
    gateway: Arc<dyn PaymentGatewayPort>,
    session: Arc<SessionStore>,
    state: Mutex<CheckoutState>,
}

impl CheckoutFlow {
    pub fn new(gateway: Arc<dyn PaymentGatewayPort>, session: Arc<SessionStore>) -> Self {
        Self {
            gateway,
            session,
            state: Mutex::new(CheckoutState::default()),
        }
    }

    pub async fn state(&self) -> CheckoutState {
        self.state.lock().await.clone()
    }

    pub async fn open(&self) {
        let mut state = self.state.lock().await;
        state.open = true;
        state.error = None;
    }

    /// Close the offer. An in-flight charge is not aborted: if it
    /// succeeds after close, the entitlement still lands in the store.
    pub async fn close(&self) {
        self.state.lock().await.open = false;
    }

    pub async fn purchase(&self) -> PurchaseOutcome {
        {
            let mut state = self.state.lock().await;
            if !state.open {
                return PurchaseOutcome::Failed;
            }
            if state.processing {
                return PurchaseOutcome::AlreadyProcessing;
            }
            state.processing = true;
            state.error = None;
        }

        let result = self.gateway.charge().await;

        let mut state = self.state.lock().await;
        state.processing = false;

        match result {
            Ok(()) => match self.session.upgrade() {
                Ok(()) => {
                    state.open = false;
                    PurchaseOutcome::Upgraded
                }
                // Signed out while the charge was in flight.
                Err(_) => {
                    state.error = Some(ProviderError::NoCurrentUser.user_message());
                    PurchaseOutcome::Failed
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "payment round-trip failed");
                state.error = Some(err.user_message());
                PurchaseOutcome::Failed
            }
        }
    }
}
