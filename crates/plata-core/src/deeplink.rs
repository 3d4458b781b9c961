//! Deep-link fragments.
//!
//! `#method-<id>`, `#scam-<id>` and `#blog-<id>` select and highlight
//! one catalog entry; any other fragment is a plain page anchor. After
//! handling, the shell clears the fragment (replace, not push) so a
//! reload does not repeat the action; the highlight itself decays on
//! its own timer.

use std::time::Duration;

/// Highlight decay, independent of the fragment being cleared.
pub const HIGHLIGHT_DECAY: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    Method(String),
    Scam(String),
    Blog(String),
    /// A plain section anchor with no catalog target.
    Anchor(String),
}

impl DeepLink {
    /// Parse a location fragment, with or without the leading `#`.
    pub fn parse(fragment: &str) -> Option<DeepLink> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        if fragment.is_empty() {
            return None;
        }
        if let Some(id) = fragment.strip_prefix("method-") {
            if !id.is_empty() {
                return Some(Self::Method(id.to_string()));
            }
        }
        if let Some(id) = fragment.strip_prefix("scam-") {
            if !id.is_empty() {
                return Some(Self::Scam(id.to_string()));
            }
        }
        if let Some(id) = fragment.strip_prefix("blog-") {
            if !id.is_empty() {
                return Some(Self::Blog(id.to_string()));
            }
        }
        Some(Self::Anchor(fragment.to_string()))
    }
}
