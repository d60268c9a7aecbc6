//! Error taxonomy for the assistant
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Configuration and service error split

/// Errors surfaced by the turn pipeline and startup configuration.
///
/// Configuration variants mean the caller handed us something that should
/// never have passed validation. `Service` wraps a failed completion call and
/// is always propagated to the user, never retried.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    #[error("Temperature {0} is outside the allowed range 0.0..=1.0")]
    InvalidTemperature(f32),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Completion service error: {0:#}")]
    Service(anyhow::Error),
}

impl AssistantError {
    /// True for every variant that counts as a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AssistantError::UnknownPersona(_)
                | AssistantError::InvalidTemperature(_)
                | AssistantError::Configuration(_)
        )
    }

    pub fn is_service(&self) -> bool {
        matches!(self, AssistantError::Service(_))
    }
}
