//! Assistant backend configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

/// Backend configuration interface for OpenAI-compatible APIs.
pub trait AssistantConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    /// Upper bound on one backend round-trip; a hung call must not strand the
    /// session in its thinking state.
    fn timeout_secs(&self) -> u64;
}

/// Backend config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvAssistantConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl AssistantConfig for EnvAssistantConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.model
    }
    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl EnvAssistantConfig {
    /// Load from environment variables. Load .env (dotenvy) first when using one.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let timeout_secs = env::var("ASSISTANT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        Ok(Self {
            openai_api_key,
            openai_base_url,
            model,
            timeout_secs,
        })
    }
}
