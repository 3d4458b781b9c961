//! Simulated payment gateway.
//!
//! Stands in for a real gateway round-trip with a fixed delay. The
//! outcome is configurable so the checkout flow can exercise its
//! decline and timeout recovery paths.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use plata_core::ports::{PaymentError, PaymentGatewayPort};

/// Default round-trip delay.
pub const GATEWAY_DELAY: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulatedOutcome {
    #[default]
    Approve,
    Decline,
    TimeOut,
}

pub struct SimulatedPaymentGateway {
    delay: Duration,
    outcome: Mutex<SimulatedOutcome>,
}

impl Default for SimulatedPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPaymentGateway {
    pub fn new() -> Self {
        Self::with_delay(GATEWAY_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            outcome: Mutex::new(SimulatedOutcome::default()),
        }
    }

    /// Configure what the next charges resolve to.
    pub fn set_outcome(&self, outcome: SimulatedOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }
}

#[async_trait]
impl PaymentGatewayPort for SimulatedPaymentGateway {
    async fn charge(&self) -> Result<(), PaymentError> {
        let outcome = *self.outcome.lock().unwrap();
        tokio::time::sleep(self.delay).await;
        match outcome {
            SimulatedOutcome::Approve => Ok(()),
            SimulatedOutcome::Decline => Err(PaymentError::Declined),
            SimulatedOutcome::TimeOut => Err(PaymentError::Timeout),
        }
    }
}
