//! Persona-conditioned prompt assembly
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: System instruction, replayed history, and new user message

use super::{PersonaId, PersonaManager};
use crate::core::AssistantError;
use crate::features::completion::{PromptMessage, PromptRole};
use crate::features::conversation::{Message, Role};

/// Builder for the message list sent to the completion service
///
/// Produces, in order:
/// - the persona instruction as a system message
/// - every history message with its role preserved
/// - the new user input as the final user message
///
/// # Example
///
/// ```ignore
/// let messages = PromptBuilder::new(&persona_manager, PersonaId::Teacher)
///     .with_history(history.messages())
///     .with_user_input("What is gravity?")
///     .build()?;
/// ```
pub struct PromptBuilder<'a> {
    persona_manager: &'a PersonaManager,
    persona_id: PersonaId,
    history: &'a [Message],
    user_input: Option<&'a str>,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(persona_manager: &'a PersonaManager, persona_id: PersonaId) -> Self {
        Self {
            persona_manager,
            persona_id,
            history: &[],
            user_input: None,
        }
    }

    /// Prior turns to replay
    pub fn with_history(mut self, history: &'a [Message]) -> Self {
        self.history = history;
        self
    }

    /// The message being submitted this turn
    pub fn with_user_input(mut self, input: &'a str) -> Self {
        self.user_input = Some(input);
        self
    }

    pub fn build(self) -> Result<Vec<PromptMessage>, AssistantError> {
        let system_prompt = self.persona_manager.get_system_prompt(self.persona_id)?;

        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(PromptMessage::new(PromptRole::System, system_prompt));

        for message in self.history {
            let role = match message.role {
                Role::User => PromptRole::User,
                Role::Assistant => PromptRole::Assistant,
            };
            messages.push(PromptMessage::new(role, message.content.as_str()));
        }

        if let Some(input) = self.user_input {
            messages.push(PromptMessage::new(PromptRole::User, input));
        }

        Ok(messages)
    }
}
