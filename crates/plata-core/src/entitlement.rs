//! Entitlement gate.
//!
//! The pure decision consumed by every premium surface (method detail,
//! blog post detail, image generation). Callers re-evaluate it
//! immediately before the gated action, never only at render time.

use crate::identity::Identity;

/// True when premium content must stay locked for the given identity.
/// Non-premium content is never locked.
pub fn is_locked(content_premium: bool, identity: Option<&Identity>) -> bool {
    content_premium && !identity.map(|id| id.premium).unwrap_or(false)
}

/// Where "open subscription" routes for the given identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionRoute {
    /// No identity: authentication comes first, at the login view.
    OpenAuth,
    /// Signed in without premium: straight to the checkout offer.
    OpenCheckout,
    /// Already premium: nothing to sell.
    AlreadyPremium,
}

pub fn subscription_route(identity: Option<&Identity>) -> SubscriptionRoute {
    match identity {
        None => SubscriptionRoute::OpenAuth,
        Some(id) if id.premium => SubscriptionRoute::AlreadyPremium,
        Some(_) => SubscriptionRoute::OpenCheckout,
    }
}
