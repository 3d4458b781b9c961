//! Application dependency grouping and wiring.
//!
//! `AppDeps` is not a builder: no defaults, no hidden logic, just the
//! ports the app needs, grouped for construction. `App::build` wires
//! the session store, the provider subscription and the flows.

use std::sync::Arc;

use plata_core::ports::{
    AssistantPort, CatalogPort, IdentityProviderPort, ImageGeneratorPort, PaymentGatewayPort,
};
use plata_core::SessionStore;

use crate::auth_flow::AuthFlow;
use crate::chat_thread::ChatThread;
use crate::checkout::CheckoutFlow;
use crate::session_sync::SessionSync;
use crate::site_audit::AuditSite;
use crate::storefront::Storefront;

/// Everything the app is built from. All dependencies are required.
pub struct AppDeps {
    pub provider: Arc<dyn IdentityProviderPort>,
    pub catalog: Arc<dyn CatalogPort>,
    pub assistant: Arc<dyn AssistantPort>,
    pub images: Arc<dyn ImageGeneratorPort>,
    pub payment: Arc<dyn PaymentGatewayPort>,
}

/// The wired application instance.
pub struct App {
    pub session: Arc<SessionStore>,
    pub storefront: Arc<Storefront>,
    pub chat: Arc<ChatThread>,
    pub site_audit: Arc<AuditSite>,
    // Keeps the store subscribed to provider events for the app's
    // lifetime; dropping the app deregisters the listener.
    _session_sync: SessionSync,
}

impl App {
    pub fn build(deps: AppDeps) -> Self {
        let session = Arc::new(SessionStore::new());
        let session_sync = SessionSync::attach(Arc::clone(&deps.provider), Arc::clone(&session));

        let auth = Arc::new(AuthFlow::new(Arc::clone(&deps.provider)));
        let checkout = Arc::new(CheckoutFlow::new(
            Arc::clone(&deps.payment),
            Arc::clone(&session),
        ));
        let storefront = Arc::new(Storefront::new(
            Arc::clone(&session),
            Arc::clone(&deps.catalog),
            Arc::clone(&deps.images),
            auth,
            checkout,
        ));
        let chat = Arc::new(ChatThread::new(Arc::clone(&deps.assistant)));
        let site_audit = Arc::new(AuditSite::new(Arc::clone(&deps.assistant)));

        Self {
            session,
            storefront,
            chat,
            site_audit,
            _session_sync: session_sync,
        }
    }
}
