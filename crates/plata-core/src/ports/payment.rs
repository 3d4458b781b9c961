//! Payment gateway port.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("payment declined")]
    Declined,
    #[error("payment gateway timed out")]
    Timeout,
    #[error("payment gateway error: {0}")]
    Gateway(String),
}

impl PaymentError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Declined => {
                "Pago rechazado. Verifica tu método de pago e intenta de nuevo.".to_string()
            }
            Self::Timeout => "La pasarela de pago no respondió. Intenta de nuevo.".to_string(),
            Self::Gateway(_) => "Error procesando el pago. Intenta de nuevo.".to_string(),
        }
    }
}

#[async_trait]
pub trait PaymentGatewayPort: Send + Sync {
    /// One charge round-trip for the premium subscription.
    async fn charge(&self) -> Result<(), PaymentError>;
}
