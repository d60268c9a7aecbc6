//! # Feature: Completion Service
//!
//! Boundary to the remote language model. The turn processor only sees the
//! `CompletionService` trait; the backends translate a role-tagged prompt into
//! their own wire format.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: OpenAI and Gemini backends

pub mod gemini;
#[cfg(test)]
pub(crate) mod mock;
pub mod openai;

pub use self::gemini::GeminiCompletionService;
pub use self::openai::OpenAiCompletionService;

use crate::core::{CompletionPayload, Config, Provider};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Role of a message sent to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: PromptRole, content: impl Into<String>) -> Self {
        PromptMessage {
            role,
            content: content.into(),
        }
    }
}

/// Everything a backend needs for one call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction first, then history, then the new user message
    pub messages: Vec<PromptMessage>,
    pub temperature: f32,
    /// Correlates log lines of a single turn
    pub request_id: Uuid,
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Run one completion. Transport, auth, and quota failures are errors;
    /// a reply of unexpected shape is an `Opaque` payload, not an error.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionPayload>;
}

/// Build the backend selected by the configuration
pub fn service_from_config(config: &Config) -> Result<Arc<dyn CompletionService>> {
    let service: Arc<dyn CompletionService> = match config.provider {
        Provider::Gemini => Arc::new(GeminiCompletionService::new(
            config.api_key.clone(),
            config.model.clone(),
            config.gemini_base_url.clone(),
        )?),
        Provider::OpenAi => Arc::new(OpenAiCompletionService::new(config.model.clone())),
    };
    Ok(service)
}
