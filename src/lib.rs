// Core layer - configuration, errors, response normalization
pub mod core;

// Features layer - personas, completion backends, conversation
pub mod features;

// CLI layer - line-oriented front-end
pub mod cli;

// TUI layer - terminal user interface (optional feature)
#[cfg(feature = "tui")]
pub mod tui;

// Re-export core items
pub use crate::core::{AssistantError, CompletionPayload, Config, Provider};

// Re-export feature items
pub use features::{
    // Completion
    service_from_config, CompletionRequest, CompletionService,
    // Conversation
    ChatSession, ConversationHistory, Message, Role, TurnProcessor, TurnRequest, TurnResult,
    // Personas
    Persona, PersonaId, PersonaManager,
};
