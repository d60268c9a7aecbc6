//! # Personas Feature
//!
//! Registry of the built-in personas and the prompt builder that turns a
//! persona plus transcript into the message list for the model.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release

pub mod manager;
pub mod prompt_builder;

pub use manager::{Persona, PersonaId, PersonaManager};
pub use prompt_builder::PromptBuilder;
