//! Image generation port.

use async_trait::async_trait;

use super::assistant::AssistantError;
use crate::image::{AspectRatio, GeneratedImage};

#[async_trait]
pub trait ImageGeneratorPort: Send + Sync {
    /// Generate one marketing image. Adapters enhance the prompt with a
    /// text-model pass first and return the enhanced prompt alongside
    /// the image.
    async fn generate(
        &self,
        prompt: &str,
        style_keywords: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<GeneratedImage, AssistantError>;
}
