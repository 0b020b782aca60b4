//! # Assistant backend abstraction
//!
//! Defines the [`AssistantBackend`] trait and an OpenAI-compatible implementation.
//! The backend receives the full message list (system context, history window,
//! current prompt) and returns free text that may carry the bracket-tag protocol;
//! interpreting that text is the caller's concern.

use anyhow::Result;
use async_trait::async_trait;
use prompt::ChatMessage;

mod config;
mod openai_backend;

pub use config::{AssistantConfig, EnvAssistantConfig};
pub use openai_backend::OpenAIAssistantBackend;

/// Assistant backend interface: one completion from a list of messages.
/// Object-safe; the session controller holds it as `Arc<dyn AssistantBackend>`.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Returns the assistant reply text for the given messages
    /// (system/user/assistant). May fail with a transport/backend error.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;
}
