//! Generative-AI backend client.
//!
//! One HTTP client over a `generateContent`-style API backs both the
//! conversational assistant and the image studio. The assistant keeps
//! its own conversation history and a system instruction assembled
//! from the catalog, so replies can point at exact entries with
//! in-app deep links.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use plata_core::image::{AspectRatio, GeneratedImage};
use plata_core::ports::{AssistantError, AssistantPort, CatalogPort, ImageGeneratorPort};

/// Shared transport for the generative endpoints.
#[derive(Clone)]
pub struct GenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn generate(
        &self,
        model: &str,
        body: serde_json::Value,
    ) -> Result<GenerateResponse, AssistantError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AssistantError::Transport(format!(
                "backend returned {}",
                response.status()
            )));
        }
        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn inline_image(&self) -> Option<(String, String)> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        parts.iter().find_map(|p| {
            p.inline_data.as_ref().map(|data| {
                (
                    data.mime_type
                        .clone()
                        .unwrap_or_else(|| "image/png".to_string()),
                    data.data.clone(),
                )
            })
        })
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidatePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

/// Assemble the data context the assistant grounds its answers in:
/// every catalog entry with its status, premium flag and exact deep
/// link.
pub fn build_site_context(catalog: &dyn CatalogPort) -> String {
    let mut context = String::from("DATOS DEL HUB:\n\n1. AUDITORÍA DE SITIOS:\n");
    for scam in catalog.scams() {
        context.push_str(&format!(
            "- Nombre: {} | Estado: {:?} | Link: [#scam-{}]\n",
            scam.name, scam.status, scam.id
        ));
    }
    context.push_str("\n2. MÉTODOS DEL DIRECTORIO:\n");
    for method in catalog.methods() {
        context.push_str(&format!(
            "- Nombre: {} | Categoría: {} | Premium: {} | Link: [#method-{}]\n",
            method.name,
            method.category.label(),
            if method.premium { "SÍ" } else { "NO" },
            method.id
        ));
    }
    context.push_str("\n3. GUÍAS DEL BLOG:\n");
    for post in catalog.posts() {
        context.push_str(&format!(
            "- Título: {} | Premium: {} | Link: [#blog-{}]\n",
            post.title,
            if post.premium { "SÍ" } else { "NO" },
            post.id
        ));
    }
    context
}

fn assistant_instruction(site_context: &str) -> String {
    format!(
        "Eres \"Lía\", la auditora jefa del hub.\n\
         OBJETIVO: guiar al usuario a la mejor opción concreta, sin rodeos.\n\n\
         CONTEXTO DE DATOS:\n{site_context}\n\
         REGLAS DE FORMATO:\n\
         1. Brevedad: una o dos frases.\n\
         2. Para filtrar, propone chips: ||OPTIONS: [\"Opción A\", \"Opción B\"]||\n\
         3. Al recomendar, usa el link exacto del contexto, por ejemplo \
         [Ver Ficha](#method-1) o [Ver Reporte](#scam-s1); nunca un enlace genérico."
    )
}

/// Conversational assistant over the generative backend. One logical
/// conversation per instance.
pub struct GenAiAssistant {
    client: GenAiClient,
    model: String,
    system_instruction: String,
    history: Mutex<Vec<serde_json::Value>>,
}

impl GenAiAssistant {
    pub fn new(client: GenAiClient, model: impl Into<String>, catalog: &dyn CatalogPort) -> Self {
        Self {
            client,
            model: model.into(),
            system_instruction: assistant_instruction(&build_site_context(catalog)),
            history: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AssistantPort for GenAiAssistant {
    async fn send_message(&self, text: &str) -> Result<String, AssistantError> {
        let mut history = self.history.lock().await;
        history.push(serde_json::json!({
            "role": "user",
            "parts": [{ "text": text }],
        }));

        let body = serde_json::json!({
            "contents": history.clone(),
            "systemInstruction": { "parts": [{ "text": self.system_instruction }] },
            "generationConfig": { "temperature": 0.4 },
        });
        let response = self.client.generate(&self.model, body).await?;
        let reply = response.text().ok_or(AssistantError::EmptyResponse)?;

        history.push(serde_json::json!({
            "role": "model",
            "parts": [{ "text": reply }],
        }));
        Ok(reply)
    }

    async fn analyze_site(&self, name_or_url: &str) -> Result<String, AssistantError> {
        let prompt = format!(
            "Analiza el sitio \"{name_or_url}\" brevemente.\n\
             Contexto: auditoría de seguridad para ganar dinero online.\n\
             Reglas:\n\
             1. Venta de reseñas, cuentas o airdrops -> LEGÍTIMO (grey hat).\n\
             2. Ponzi o inversión con retorno fijo -> SCAM.\n\
             Responde en 3 líneas máximo, en Markdown."
        );
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.3 },
        });
        let response = self.client.generate(&self.model, body).await?;
        response.text().ok_or(AssistantError::EmptyResponse)
    }
}

/// Two-step image generation: a text-model pass rewrites the concept
/// into a detailed prompt, then the image model renders it.
pub struct GenAiImageGenerator {
    client: GenAiClient,
    text_model: String,
    image_model: String,
}

impl GenAiImageGenerator {
    pub fn new(
        client: GenAiClient,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            text_model: text_model.into(),
            image_model: image_model.into(),
        }
    }

    async fn enhance_prompt(
        &self,
        prompt: &str,
        style_keywords: &str,
    ) -> Result<String, AssistantError> {
        let instruction = format!(
            "ACT AS: world-class AI art prompt engineer.\n\
             TASK: rewrite the request into one detailed English prompt for an \
             image model.\n\
             INPUT CONCEPT: \"{prompt}\"\n\
             MANDATORY VISUAL STYLE: \"{style_keywords}\"\n\
             GUIDELINES: lead with the subject, force the style, define \
             lighting and quality. Output the raw prompt only, no quotes."
        );
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": instruction }] }],
        });
        let response = self.client.generate(&self.text_model, body).await?;
        Ok(response
            .text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("{prompt}, {style_keywords}, 8k, high quality")))
    }
}

#[async_trait]
impl ImageGeneratorPort for GenAiImageGenerator {
    async fn generate(
        &self,
        prompt: &str,
        style_keywords: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<GeneratedImage, AssistantError> {
        let enhanced_prompt = self.enhance_prompt(prompt, style_keywords).await?;

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": enhanced_prompt }] }],
            "generationConfig": {
                "imageConfig": {
                    "aspectRatio": aspect_ratio.as_str(),
                    "imageSize": "1K",
                },
            },
        });
        let response = self.client.generate(&self.image_model, body).await?;
        let (mime_type, data) = response
            .inline_image()
            .ok_or(AssistantError::EmptyResponse)?;

        Ok(GeneratedImage {
            data_uri: format!("data:{mime_type};base64,{data}"),
            enhanced_prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    #[test]
    fn test_site_context_lists_every_collection_with_links() {
        let catalog = StaticCatalog::new();
        let context = build_site_context(&catalog);

        assert!(context.contains("[#scam-s1]"));
        assert!(context.contains("[#method-pro-1]"));
        assert!(context.contains("[#blog-1]"));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hola " }, { "text": "mundo" }] }
            }]
        }))
        .unwrap();
        assert_eq!(response.text().unwrap(), "Hola mundo");
    }

    #[test]
    fn test_response_without_image_part_has_no_image() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "no image here" }] }
            }]
        }))
        .unwrap();
        assert!(response.inline_image().is_none());
    }

    #[test]
    fn test_inline_image_defaults_mime_type() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "data": "QUJD" } }] }
            }]
        }))
        .unwrap();
        let (mime, data) = response.inline_image().unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(data, "QUJD");
    }
}
