//! Configuration loading.
//!
//! Defaults, then an optional TOML file, then `PLATA_`-prefixed
//! environment variables (e.g. `PLATA_IDENTITY__API_KEY`).

use std::path::Path;

use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IdentityConfig {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub api_key: String,
    pub chat_model: String,
    pub image_model: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PaymentConfig {
    /// Simulated gateway round-trip, in milliseconds.
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub identity: IdentityConfig,
    pub assistant: AssistantConfig,
    pub payment: PaymentConfig,
}

impl AppConfig {
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .set_default("identity.endpoint", "https://identitytoolkit.googleapis.com")?
            .set_default("identity.api_key", "")?
            .set_default(
                "assistant.endpoint",
                "https://generativelanguage.googleapis.com",
            )?
            .set_default("assistant.api_key", "")?
            .set_default("assistant.chat_model", "gemini-3-flash-preview")?
            .set_default("assistant.image_model", "gemini-3-pro-image-preview")?
            .set_default("payment.delay_ms", 2500i64)?;

        if let Some(file) = file {
            builder = builder.add_source(File::from(file.to_path_buf()));
        }
        builder = builder.add_source(Environment::with_prefix("PLATA").separator("__"));

        builder
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }
}
