//! One-shot site risk assessment.

use std::sync::Arc;

use anyhow::Context;

use plata_core::ports::AssistantPort;

/// Use case for auditing a site name or URL through the assistant
/// backend. Independent of the chat thread: each call is one shot.
pub struct AuditSite {
    assistant: Arc<dyn AssistantPort>,
}

impl AuditSite {
    pub fn new(assistant: Arc<dyn AssistantPort>) -> Self {
        Self { assistant }
    }

    /// Short Markdown verdict for the given site.
    pub async fn execute(&self, name_or_url: &str) -> anyhow::Result<String> {
        let name_or_url = name_or_url.trim();
        if name_or_url.is_empty() {
            anyhow::bail!("nothing to audit");
        }
        self.assistant
            .analyze_site(name_or_url)
            .await
            .context("site audit failed")
    }
}
