//! # Feature: Conversation
//!
//! Transcript types, the turn processor, and the session state behind the
//! submit/clear actions of the front-ends.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release

pub mod processor;
pub mod session;

pub use processor::TurnProcessor;
pub use session::ChatSession;

use crate::core::AssistantError;
use serde::{Deserialize, Serialize};

/// Speaker of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Chronological transcript of a session. Append-only apart from `clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of completed user/assistant exchanges
    pub fn turn_count(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::User).count()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl From<Vec<Message>> for ConversationHistory {
    fn from(messages: Vec<Message>) -> Self {
        ConversationHistory { messages }
    }
}

impl<'a> IntoIterator for &'a ConversationHistory {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Input of one turn. The history is moved in and handed back in `TurnResult`.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub user_input: String,
    pub history: ConversationHistory,
    pub temperature: f32,
    pub persona: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    /// Always empty; the front-end resets its input field to this
    pub cleared_input: String,
    pub updated_history: ConversationHistory,
}

/// Accept temperatures in `0.0..=1.0`. NaN and anything outside is rejected.
pub fn validate_temperature(temperature: f32) -> Result<f32, AssistantError> {
    if (0.0..=1.0).contains(&temperature) {
        Ok(temperature)
    } else {
        Err(AssistantError::InvalidTemperature(temperature))
    }
}
