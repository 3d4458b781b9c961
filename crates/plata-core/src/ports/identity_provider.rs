//! Identity provider port.
//!
//! The only boundary allowed to talk to the remote identity service.
//! Adapters publish every session change on their event hub; callers
//! must not assume ordering between two concurrent calls beyond
//! last-write-wins on the session store.

use async_trait::async_trait;

use crate::auth::ProviderError;
use crate::identity::ProviderIdentity;
use crate::session::events::SessionEventHub;

#[async_trait]
pub trait IdentityProviderPort: Send + Sync {
    /// Long-lived session subscription surface. Fires on sign-in,
    /// sign-out, token refresh and verification reload; listeners
    /// deregister through the hub and receive nothing afterwards.
    fn events(&self) -> &SessionEventHub;

    async fn sign_in(&self, email: &str, password: &str)
        -> Result<ProviderIdentity, ProviderError>;

    /// Create the account and send the verification email as a side
    /// effect. The returned identity is unverified.
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<ProviderIdentity, ProviderError>;

    /// Resend the verification email for the held principal.
    async fn resend_verification(&self) -> Result<(), ProviderError>;

    /// Re-fetch the verification status of the held principal. On the
    /// transition to verified the adapter republishes the session event.
    async fn reload_verified(&self) -> Result<bool, ProviderError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError>;

    async fn sign_out(&self);
}
