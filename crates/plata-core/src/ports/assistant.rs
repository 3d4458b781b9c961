//! Conversational assistant port.

use async_trait::async_trait;
use thiserror::Error;

/// Failure surfaced by the generative-AI boundary. No structured
/// recovery: callers convert it to inline, feature-local feedback and
/// never let it reach the auth/entitlement subsystem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssistantError {
    #[error("assistant transport error: {0}")]
    Transport(String),
    #[error("assistant returned an empty or malformed response")]
    EmptyResponse,
}

/// One logical conversation per port instance; the adapter owns the
/// hosted-model session and its context.
#[async_trait]
pub trait AssistantPort: Send + Sync {
    /// One chat turn: send the user text, get the raw reply. The reply
    /// may embed markup and an options directive; parsing is the
    /// caller's job (`plata_core::chat`).
    async fn send_message(&self, text: &str) -> Result<String, AssistantError>;

    /// One-shot risk assessment of a site name or URL, short Markdown.
    async fn analyze_site(&self, name_or_url: &str) -> Result<String, AssistantError>;
}
