//! # Features
//!
//! - `personas`: persona registry and prompt assembly
//! - `completion`: completion service boundary and backends
//! - `conversation`: transcript types, turn processor, chat session

pub mod completion;
pub mod conversation;
pub mod personas;

pub use completion::{
    service_from_config, CompletionRequest, CompletionService, GeminiCompletionService,
    OpenAiCompletionService, PromptMessage, PromptRole,
};
pub use conversation::{
    ChatSession, ConversationHistory, Message, Role, TurnProcessor, TurnRequest, TurnResult,
};
pub use personas::{Persona, PersonaId, PersonaManager, PromptBuilder};
