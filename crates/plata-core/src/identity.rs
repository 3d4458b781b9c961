//! Session principal models.

use serde::{Deserialize, Serialize};

/// What the identity provider reports about the signed-in principal.
///
/// Carries no entitlement data: premium status is owned by the session
/// layer, never by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    pub display_name: String,
    pub email: String,
    /// Short-lived access token minted by the provider.
    pub token: String,
    pub verified: bool,
}

/// The session principal and its flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    pub email: String,
    pub token: String,
    pub verified: bool,
    pub premium: bool,
}

impl Identity {
    /// Build from a provider report, seeding `premium` from the previous
    /// in-memory value. Premium survives token refreshes within a
    /// session and is lost on sign-out or full restart.
    pub fn from_provider(update: ProviderIdentity, previous_premium: bool) -> Self {
        Self {
            display_name: update.display_name,
            email: update.email,
            token: update.token,
            verified: update.verified,
            premium: previous_premium,
        }
    }
}
