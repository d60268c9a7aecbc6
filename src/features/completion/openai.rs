//! OpenAI chat completions backend
//!
//! The `openai` crate reads its credential from `OPENAI_KEY`; the binaries
//! export it from the loaded configuration before the first call.

use super::{CompletionRequest, CompletionService, PromptMessage, PromptRole};
use crate::core::CompletionPayload;
use ::openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use anyhow::Result;
use async_trait::async_trait;
use log::debug;

pub struct OpenAiCompletionService {
    model: String,
}

impl OpenAiCompletionService {
    pub fn new(model: String) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Convert prompt messages into the crate's chat message type
pub(crate) fn to_chat_messages(messages: &[PromptMessage]) -> Vec<ChatCompletionMessage> {
    messages
        .iter()
        .map(|m| ChatCompletionMessage {
            role: match m.role {
                PromptRole::System => ChatCompletionMessageRole::System,
                PromptRole::User => ChatCompletionMessageRole::User,
                PromptRole::Assistant => ChatCompletionMessageRole::Assistant,
            },
            content: Some(m.content.clone()),
            name: None,
            function_call: None,
            tool_call_id: None,
            tool_calls: None,
        })
        .collect()
}

#[async_trait]
impl CompletionService for OpenAiCompletionService {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionPayload> {
        let request_id = request.request_id;
        let messages = to_chat_messages(&request.messages);

        debug!("[{request_id}] Sending {} messages to OpenAI ({})", messages.len(), self.model);

        let completion = ChatCompletion::builder(&self.model, messages)
            .temperature(request.temperature)
            .create()
            .await
            .map_err(|e| anyhow::anyhow!("OpenAI request failed: {}", e))?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone());

        match content {
            Some(text) => Ok(CompletionPayload::Text(text)),
            None => Ok(CompletionPayload::Opaque(format!("{:?}", completion.choices))),
        }
    }
}
