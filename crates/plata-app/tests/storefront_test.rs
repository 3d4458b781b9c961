//! Storefront gating tests
//!
//! The entitlement gate across its three surfaces, the subscription
//! routing branch, the simulated checkout (including the decline
//! path) and deep-link consumption.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use plata_app::{App, AppDeps, ContentAccess, DeepLinkOutcome, ImageOutcome, PurchaseOutcome};
use plata_core::entitlement::SubscriptionRoute;
use plata_core::image::{AspectRatio, GeneratedImage};
use plata_core::ports::{
    AssistantError, AssistantPort, IdentityProviderPort, ImageGeneratorPort,
};
use plata_infra::{InMemoryIdentityProvider, SimulatedOutcome, SimulatedPaymentGateway, StaticCatalog};

/// Canned assistant: fixed reply, switchable to failure.
struct ScriptedAssistant {
    reply: String,
    fail: bool,
}

#[async_trait]
impl AssistantPort for ScriptedAssistant {
    async fn send_message(&self, _text: &str) -> Result<String, AssistantError> {
        if self.fail {
            Err(AssistantError::Transport("offline".to_string()))
        } else {
            Ok(self.reply.clone())
        }
    }

    async fn analyze_site(&self, _name_or_url: &str) -> Result<String, AssistantError> {
        self.send_message("").await
    }
}

/// Canned image backend.
struct ScriptedImages {
    fail: bool,
}

#[async_trait]
impl ImageGeneratorPort for ScriptedImages {
    async fn generate(
        &self,
        prompt: &str,
        style_keywords: &str,
        _aspect_ratio: AspectRatio,
    ) -> Result<GeneratedImage, AssistantError> {
        if self.fail {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(GeneratedImage {
            data_uri: "data:image/png;base64,QUJD".to_string(),
            enhanced_prompt: format!("{prompt}, {style_keywords}"),
        })
    }
}

struct Harness {
    provider: Arc<InMemoryIdentityProvider>,
    gateway: Arc<SimulatedPaymentGateway>,
    app: App,
}

fn harness_with(images_fail: bool) -> Harness {
    let provider = Arc::new(InMemoryIdentityProvider::new());
    let provider_dyn: Arc<dyn IdentityProviderPort> = provider.clone();
    let gateway = Arc::new(SimulatedPaymentGateway::new());

    let app = App::build(AppDeps {
        provider: provider_dyn,
        catalog: Arc::new(StaticCatalog::new()),
        assistant: Arc::new(ScriptedAssistant {
            reply: "ok".to_string(),
            fail: false,
        }),
        images: Arc::new(ScriptedImages { fail: images_fail }),
        payment: gateway.clone(),
    });

    Harness {
        provider,
        gateway,
        app,
    }
}

fn harness() -> Harness {
    harness_with(false)
}

async fn sign_in(h: &Harness) {
    h.provider.seed_account("ana@example.com", "Secreta1!", "Ana", true);
    h.provider
        .sign_in("ana@example.com", "Secreta1!")
        .await
        .unwrap();
    assert!(h.app.session.current().is_some());
}

// =========================================================================
// Subscription routing
// =========================================================================

#[tokio::test]
async fn test_open_subscription_without_identity_opens_auth_at_login() {
    let h = harness();

    let route = h.app.storefront.open_subscription().await;

    assert_eq!(route, SubscriptionRoute::OpenAuth);
    let auth = h.app.storefront.auth().snapshot().await;
    assert!(auth.open);
    assert_eq!(auth.view, plata_core::AuthView::Login);
    assert!(!h.app.storefront.checkout().state().await.open);
}

#[tokio::test]
async fn test_open_subscription_with_free_identity_opens_checkout() {
    let h = harness();
    sign_in(&h).await;

    let route = h.app.storefront.open_subscription().await;

    assert_eq!(route, SubscriptionRoute::OpenCheckout);
    assert!(h.app.storefront.checkout().state().await.open);
    assert!(!h.app.storefront.auth().snapshot().await.open);
}

#[tokio::test]
async fn test_open_subscription_with_premium_identity_is_a_no_op() {
    let h = harness();
    sign_in(&h).await;
    h.app.session.upgrade().unwrap();

    let route = h.app.storefront.open_subscription().await;

    assert_eq!(route, SubscriptionRoute::AlreadyPremium);
    assert!(!h.app.storefront.checkout().state().await.open);
    assert!(!h.app.storefront.auth().snapshot().await.open);
}

// =========================================================================
// Content gating
// =========================================================================

#[tokio::test]
async fn test_free_content_is_open_to_everyone() {
    let h = harness();

    assert!(matches!(
        h.app.storefront.open_method("1").await,
        ContentAccess::Granted(_)
    ));
    assert!(matches!(
        h.app.storefront.open_post("1").await,
        ContentAccess::Granted(_)
    ));
}

#[tokio::test]
async fn test_premium_content_locked_without_identity_routes_to_auth() {
    let h = harness();

    let access = h.app.storefront.open_method("pro-1").await;

    assert_eq!(access, ContentAccess::Locked(SubscriptionRoute::OpenAuth));
    assert!(h.app.storefront.auth().snapshot().await.open);
}

#[tokio::test]
async fn test_premium_content_locked_for_free_identity_routes_to_checkout() {
    let h = harness();
    sign_in(&h).await;

    let access = h.app.storefront.open_post("pro-1").await;

    assert_eq!(access, ContentAccess::Locked(SubscriptionRoute::OpenCheckout));
    assert!(h.app.storefront.checkout().state().await.open);
}

#[tokio::test]
async fn test_unknown_content_id() {
    let h = harness();
    assert_eq!(
        h.app.storefront.open_method("no-such-id").await,
        ContentAccess::NotFound
    );
}

// =========================================================================
// Checkout
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_purchase_unlocks_previously_locked_content() {
    let h = harness();
    sign_in(&h).await;

    assert!(matches!(
        h.app.storefront.open_method("pro-1").await,
        ContentAccess::Locked(_)
    ));

    let checkout = h.app.storefront.checkout();
    let outcome = checkout.purchase().await;

    assert_eq!(outcome, PurchaseOutcome::Upgraded);
    assert!(!checkout.state().await.open);
    assert!(h.app.session.current().unwrap().premium);

    // No new identity fetch: the same session now passes the gate.
    assert!(matches!(
        h.app.storefront.open_method("pro-1").await,
        ContentAccess::Granted(_)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_declined_purchase_stays_open_and_recovers_on_retry() {
    let h = harness();
    sign_in(&h).await;
    h.app.storefront.open_subscription().await;

    h.gateway.set_outcome(SimulatedOutcome::Decline);
    let checkout = h.app.storefront.checkout();
    assert_eq!(checkout.purchase().await, PurchaseOutcome::Failed);

    let state = checkout.state().await;
    assert!(state.open);
    assert!(state.error.is_some());
    assert!(!h.app.session.current().unwrap().premium);

    // Retry after the decline goes through.
    h.gateway.set_outcome(SimulatedOutcome::Approve);
    assert_eq!(checkout.purchase().await, PurchaseOutcome::Upgraded);
    assert!(h.app.session.current().unwrap().premium);
}

#[tokio::test(start_paused = true)]
async fn test_purchase_after_sign_out_mid_flight_does_not_upgrade() {
    let h = harness();
    sign_in(&h).await;
    h.app.storefront.open_subscription().await;

    let checkout = Arc::clone(h.app.storefront.checkout());
    let purchase = tokio::spawn(async move { checkout.purchase().await });

    // The gateway round-trip is still pending when the user signs out.
    tokio::time::sleep(Duration::from_millis(100)).await;
    h.provider.sign_out().await;

    assert_eq!(purchase.await.unwrap(), PurchaseOutcome::Failed);
    assert!(h.app.session.current().is_none());
}

// =========================================================================
// Image studio
// =========================================================================

#[tokio::test]
async fn test_image_generation_is_premium_gated() {
    let h = harness();

    let outcome = h
        .app
        .storefront
        .generate_image("logo para mi marca", "3D render", AspectRatio::Square)
        .await;

    assert_eq!(outcome, ImageOutcome::Locked(SubscriptionRoute::OpenAuth));
    assert!(h.app.storefront.auth().snapshot().await.open);
}

#[tokio::test]
async fn test_image_generation_for_premium_identity() {
    let h = harness();
    sign_in(&h).await;
    h.app.session.upgrade().unwrap();

    let outcome = h
        .app
        .storefront
        .generate_image("logo para mi marca", "3D render", AspectRatio::Widescreen)
        .await;

    match outcome {
        ImageOutcome::Generated(image) => {
            assert!(image.data_uri.starts_with("data:image/"));
            assert!(image.enhanced_prompt.contains("3D render"));
        }
        other => panic!("expected an image, got {other:?}"),
    }
}

#[tokio::test]
async fn test_image_backend_failure_is_inline_and_local() {
    let h = harness_with(true);
    sign_in(&h).await;
    h.app.session.upgrade().unwrap();

    let outcome = h
        .app
        .storefront
        .generate_image("logo", "flat", AspectRatio::Square)
        .await;

    assert!(matches!(outcome, ImageOutcome::Failed(_)));
    // The failure never touched the session.
    assert!(h.app.session.current().unwrap().premium);
}

// =========================================================================
// Deep links
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_deep_link_to_premium_method_stays_locked() {
    let h = harness();

    let outcome = h.app.storefront.handle_deep_link("#method-pro-1").await;

    match outcome {
        DeepLinkOutcome::Highlight { target, locked } => {
            assert_eq!(target, plata_app::CatalogRef::Method("pro-1".to_string()));
            assert!(locked);
        }
        other => panic!("expected a highlight, got {other:?}"),
    }
    assert!(h.app.storefront.highlighted().await.is_some());

    // Highlight decays on its own clock.
    tokio::time::sleep(Duration::from_millis(2600)).await;
    assert!(h.app.storefront.highlighted().await.is_none());
}

#[tokio::test]
async fn test_deep_link_to_scam_entry_is_never_locked() {
    let h = harness();

    let outcome = h.app.storefront.handle_deep_link("#scam-s1").await;

    assert_eq!(
        outcome,
        DeepLinkOutcome::Highlight {
            target: plata_app::CatalogRef::Scam("s1".to_string()),
            locked: false,
        }
    );
}

#[tokio::test]
async fn test_plain_anchor_scrolls_and_unknown_id_is_ignored() {
    let h = harness();

    assert_eq!(
        h.app.storefront.handle_deep_link("#directory").await,
        DeepLinkOutcome::Scroll("directory".to_string())
    );
    assert_eq!(
        h.app.storefront.handle_deep_link("#method-zzz").await,
        DeepLinkOutcome::Ignored
    );
    assert_eq!(
        h.app.storefront.handle_deep_link("").await,
        DeepLinkOutcome::Ignored
    );
}

#[tokio::test(start_paused = true)]
async fn test_newer_highlight_outlives_the_old_decay_timer() {
    let h = harness();

    h.app.storefront.handle_deep_link("#scam-s1").await;
    tokio::time::sleep(Duration::from_millis(2000)).await;
    h.app.storefront.handle_deep_link("#scam-s2").await;

    // The first timer fires now; the newer highlight must survive it.
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(
        h.app.storefront.highlighted().await,
        Some(plata_app::CatalogRef::Scam("s2".to_string()))
    );

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert!(h.app.storefront.highlighted().await.is_none());
}
