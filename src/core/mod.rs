//! # Core Module
//!
//! Configuration, error taxonomy, and completion payload normalization.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial creation with config, error, and response modules

pub mod config;
pub mod error;
pub mod response;

// Re-export commonly used items
pub use config::{Config, Provider};
pub use error::AssistantError;
pub use response::{normalize, normalize_payload, CompletionPayload};
