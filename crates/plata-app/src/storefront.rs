//! Storefront gating.
//!
//! Every premium surface funnels through here: method detail, blog
//! post detail and image generation re-check the entitlement gate at
//! action time, and a locked interaction routes to authentication or
//! the checkout offer instead of performing the content action. Deep
//! links resolve through the same gate.

use std::sync::Arc;

use tokio::sync::Mutex;

use plata_core::catalog::{BlogPost, Method, ScamEntry};
use plata_core::deeplink::{DeepLink, HIGHLIGHT_DECAY};
use plata_core::entitlement::{self, SubscriptionRoute};
use plata_core::image::{AspectRatio, GeneratedImage};
use plata_core::ports::{CatalogPort, ImageGeneratorPort};
use plata_core::SessionStore;

use crate::auth_flow::AuthFlow;
use crate::checkout::CheckoutFlow;

const MSG_IMAGE_FAILED: &str = "No se pudo generar la imagen. Intenta con otro concepto.";

/// A catalog entry addressed by collection and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRef {
    Method(String),
    Scam(String),
    Blog(String),
}

/// Outcome of a gated content interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentAccess<T> {
    Granted(T),
    /// The gate held; the subscription path was opened instead.
    Locked(SubscriptionRoute),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Generated(GeneratedImage),
    Locked(SubscriptionRoute),
    /// Inline, feature-local failure message.
    Failed(String),
}

/// Outcome of consuming a navigation fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLinkOutcome {
    /// Reveal and highlight the entry. `locked` comes from the same
    /// gate as a direct interaction: deep-linking never bypasses
    /// entitlement. The shell clears the fragment (replace, not push).
    Highlight { target: CatalogRef, locked: bool },
    /// A plain section anchor: scroll only.
    Scroll(String),
    Ignored,
}

#[derive(Default)]
struct HighlightState {
    target: Option<CatalogRef>,
    generation: u64,
}

pub struct Storefront {
    session: Arc<SessionStore>,
    catalog: Arc<dyn CatalogPort>,
    images: Arc<dyn ImageGeneratorPort>,
    auth: Arc<AuthFlow>,
    checkout: Arc<CheckoutFlow>,
    highlight: Arc<Mutex<HighlightState>>,
}

impl Storefront {
    pub fn new(
        session: Arc<SessionStore>,
        catalog: Arc<dyn CatalogPort>,
        images: Arc<dyn ImageGeneratorPort>,
        auth: Arc<AuthFlow>,
        checkout: Arc<CheckoutFlow>,
    ) -> Self {
        Self {
            session,
            catalog,
            images,
            auth,
            checkout,
            highlight: Arc::new(Mutex::new(HighlightState::default())),
        }
    }

    pub fn auth(&self) -> &Arc<AuthFlow> {
        &self.auth
    }

    pub fn checkout(&self) -> &Arc<CheckoutFlow> {
        &self.checkout
    }

    /// The upsell entry point. Without an identity, authentication
    /// comes first; with a free identity, the checkout offer opens.
    pub async fn open_subscription(&self) -> SubscriptionRoute {
        let current = self.session.current();
        let route = entitlement::subscription_route(current.as_ref());
        match route {
            SubscriptionRoute::OpenAuth => self.auth.open().await,
            SubscriptionRoute::OpenCheckout => self.checkout.open().await,
            SubscriptionRoute::AlreadyPremium => {}
        }
        route
    }

    /// Open a method detail. The gate is evaluated here, at action
    /// time, not from any earlier render.
    pub async fn open_method(&self, id: &str) -> ContentAccess<Method> {
        let Some(method) = self.catalog.method_by_id(id).cloned() else {
            return ContentAccess::NotFound;
        };
        if entitlement::is_locked(method.premium, self.session.current().as_ref()) {
            return ContentAccess::Locked(self.open_subscription().await);
        }
        ContentAccess::Granted(method)
    }

    /// Open a blog post, same gating as method detail.
    pub async fn open_post(&self, id: &str) -> ContentAccess<BlogPost> {
        let Some(post) = self.catalog.post_by_id(id).cloned() else {
            return ContentAccess::NotFound;
        };
        if entitlement::is_locked(post.premium, self.session.current().as_ref()) {
            return ContentAccess::Locked(self.open_subscription().await);
        }
        ContentAccess::Granted(post)
    }

    /// Scam entries are never premium; lookup only.
    pub fn scam_entry(&self, id: &str) -> Option<ScamEntry> {
        self.catalog.scam_by_id(id).cloned()
    }

    /// The image studio is a premium surface: the gate runs before any
    /// provider call.
    pub async fn generate_image(
        &self,
        prompt: &str,
        style_keywords: &str,
        aspect_ratio: AspectRatio,
    ) -> ImageOutcome {
        if entitlement::is_locked(true, self.session.current().as_ref()) {
            return ImageOutcome::Locked(self.open_subscription().await);
        }
        match self.images.generate(prompt, style_keywords, aspect_ratio).await {
            Ok(image) => ImageOutcome::Generated(image),
            Err(err) => {
                tracing::warn!(error = %err, "image generation failed");
                ImageOutcome::Failed(MSG_IMAGE_FAILED.to_string())
            }
        }
    }

    /// Consume a navigation fragment. Catalog targets are revealed and
    /// highlighted regardless of filter state but still pass the gate;
    /// the highlight decays on its own timer, independent of the shell
    /// clearing the fragment.
    pub async fn handle_deep_link(&self, fragment: &str) -> DeepLinkOutcome {
        let Some(link) = DeepLink::parse(fragment) else {
            return DeepLinkOutcome::Ignored;
        };

        let current = self.session.current();
        let (target, locked) = match link {
            DeepLink::Method(id) => match self.catalog.method_by_id(&id) {
                Some(method) => (
                    CatalogRef::Method(id),
                    entitlement::is_locked(method.premium, current.as_ref()),
                ),
                None => return DeepLinkOutcome::Ignored,
            },
            DeepLink::Scam(id) => match self.catalog.scam_by_id(&id) {
                Some(_) => (CatalogRef::Scam(id), false),
                None => return DeepLinkOutcome::Ignored,
            },
            DeepLink::Blog(id) => match self.catalog.post_by_id(&id) {
                Some(post) => (
                    CatalogRef::Blog(id),
                    entitlement::is_locked(post.premium, current.as_ref()),
                ),
                None => return DeepLinkOutcome::Ignored,
            },
            DeepLink::Anchor(section) => return DeepLinkOutcome::Scroll(section),
        };

        self.set_highlight(target.clone()).await;
        DeepLinkOutcome::Highlight { target, locked }
    }

    pub async fn highlighted(&self) -> Option<CatalogRef> {
        self.highlight.lock().await.target.clone()
    }

    async fn set_highlight(&self, target: CatalogRef) {
        let generation = {
            let mut highlight = self.highlight.lock().await;
            highlight.generation += 1;
            highlight.target = Some(target);
            highlight.generation
        };

        let highlight = Arc::clone(&self.highlight);
        tokio::spawn(async move {
            tokio::time::sleep(HIGHLIGHT_DECAY).await;
            let mut highlight = highlight.lock().await;
            // A newer highlight owns the slot now.
            if highlight.generation == generation {
                highlight.target = None;
            }
        });
    }
}
