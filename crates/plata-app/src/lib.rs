//! Plata application orchestration layer.
//!
//! Owns the flows that coordinate ports, timers and the session store:
//! the auth modal controller, checkout, storefront gating, the chat
//! thread and provider session synchronization.

pub mod auth_flow;
pub mod chat_thread;
pub mod checkout;
pub mod deps;
pub mod session_sync;
pub mod site_audit;
pub mod storefront;

pub use auth_flow::{AuthFlow, AuthSnapshot};
pub use chat_thread::{ChatMessage, ChatThread};
pub use checkout::{CheckoutFlow, CheckoutState, PurchaseOutcome};
pub use deps::{App, AppDeps};
pub use session_sync::SessionSync;
pub use site_audit::AuditSite;
pub use storefront::{CatalogRef, ContentAccess, DeepLinkOutcome, ImageOutcome, Storefront};
