//! Startup configuration loaded from the environment
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Provider selection, credentials, session defaults, request timeout

use crate::core::error::AssistantError;
use crate::features::conversation::validate_temperature;
use crate::features::personas::PersonaId;
use std::env;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Which completion backend serves the turns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Gemini => write!(f, "gemini"),
            Provider::OpenAi => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            _ => Err(AssistantError::Configuration(format!(
                "Invalid ASSISTANT_PROVIDER: {s} (expected gemini or openai)"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub gemini_base_url: String,
    pub default_persona: PersonaId,
    pub default_temperature: f32,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, AssistantError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AssistantError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get("ASSISTANT_PROVIDER") {
            Some(p) => p.parse::<Provider>()?,
            None if get("GEMINI_API_KEY").is_some() => Provider::Gemini,
            None => Provider::OpenAi,
        };

        let key_var = match provider {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        };
        let api_key = get(key_var).ok_or_else(|| {
            AssistantError::Configuration(format!("{key_var} must be set for the {provider} provider"))
        })?;

        let model = get("ASSISTANT_MODEL").unwrap_or_else(|| match provider {
            Provider::Gemini => DEFAULT_GEMINI_MODEL.to_string(),
            Provider::OpenAi => DEFAULT_OPENAI_MODEL.to_string(),
        });

        let gemini_base_url = get("GEMINI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

        let default_persona = match get("ASSISTANT_DEFAULT_PERSONA") {
            Some(name) => name.parse::<PersonaId>()?,
            None => PersonaId::default(),
        };

        let default_temperature = match get("ASSISTANT_DEFAULT_TEMPERATURE") {
            Some(raw) => {
                let value: f32 = raw.trim().parse().map_err(|_| {
                    AssistantError::Configuration(format!(
                        "ASSISTANT_DEFAULT_TEMPERATURE is not a number: {raw}"
                    ))
                })?;
                validate_temperature(value)?
            }
            None => DEFAULT_TEMPERATURE,
        };

        let timeout_secs = match get("ASSISTANT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                AssistantError::Configuration(format!(
                    "ASSISTANT_REQUEST_TIMEOUT_SECS must be a positive integer: {raw}"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            provider,
            api_key,
            model,
            gemini_base_url,
            default_persona,
            default_temperature,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_gemini_inferred_from_key() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "g-key")])).unwrap();
        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.api_key, "g-key");
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.default_persona, PersonaId::Scientist);
        assert_eq!(config.default_temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_openai_fallback() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.model, DEFAULT_OPENAI_MODEL);
    }

    #[test]
    fn test_missing_credential_is_configuration_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        let err = Config::from_lookup(lookup(&[("ASSISTANT_PROVIDER", "gemini")])).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_explicit_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ASSISTANT_PROVIDER", "OpenAI"),
            ("OPENAI_API_KEY", "sk-test"),
            ("GEMINI_API_KEY", "ignored"),
            ("ASSISTANT_MODEL", "gpt-4o"),
            ("ASSISTANT_DEFAULT_PERSONA", "teacher"),
            ("ASSISTANT_DEFAULT_TEMPERATURE", "0.9"),
            ("ASSISTANT_REQUEST_TIMEOUT_SECS", "10"),
            ("GEMINI_BASE_URL", "http://localhost:9000/"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.default_persona, PersonaId::Teacher);
        assert_eq!(config.default_temperature, 0.9);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.gemini_base_url, "http://localhost:9000");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = ("GEMINI_API_KEY", "g-key");

        let err = Config::from_lookup(lookup(&[base, ("ASSISTANT_PROVIDER", "llama")])).unwrap_err();
        assert!(err.is_configuration());

        let err = Config::from_lookup(lookup(&[base, ("ASSISTANT_DEFAULT_PERSONA", "Philosopher")]))
            .unwrap_err();
        assert!(matches!(err, AssistantError::UnknownPersona(_)));

        let err = Config::from_lookup(lookup(&[base, ("ASSISTANT_DEFAULT_TEMPERATURE", "1.5")]))
            .unwrap_err();
        assert!(matches!(err, AssistantError::InvalidTemperature(_)));

        let err = Config::from_lookup(lookup(&[base, ("ASSISTANT_DEFAULT_TEMPERATURE", "warm")]))
            .unwrap_err();
        assert!(err.is_configuration());

        let err = Config::from_lookup(lookup(&[base, ("ASSISTANT_REQUEST_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
