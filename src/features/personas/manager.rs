//! # Feature: Persona Registry
//!
//! Fixed set of instruction profiles (scientist, analyst, teacher) that condition
//! the model's tone, structure, and answer length.
//! Each persona has a system prompt loaded from prompt/*.md files at compile time.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with three personas

use crate::core::AssistantError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a built-in persona
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PersonaId {
    #[default]
    Scientist,
    Analyst,
    Teacher,
}

impl PersonaId {
    /// All personas in display order
    pub const ALL: [PersonaId; 3] = [PersonaId::Scientist, PersonaId::Analyst, PersonaId::Teacher];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::Scientist => "Scientist",
            PersonaId::Analyst => "Analyst",
            PersonaId::Teacher => "Teacher",
        }
    }

    /// Next persona in display order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous persona in display order, wrapping around
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PersonaId {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scientist" => Ok(PersonaId::Scientist),
            "analyst" => Ok(PersonaId::Analyst),
            "teacher" => Ok(PersonaId::Teacher),
            _ => Err(AssistantError::UnknownPersona(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: PersonaId,
    pub name: String,
    pub system_prompt: String,
    pub description: String,
    /// Accent color (0xRRGGBB) used by the terminal front-end
    pub color: u32,
}

#[derive(Debug, Clone)]
pub struct PersonaManager {
    personas: HashMap<PersonaId, Persona>,
}

impl Default for PersonaManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonaManager {
    pub fn new() -> Self {
        let mut personas = HashMap::new();

        // Prompts are embedded at compile time
        personas.insert(
            PersonaId::Scientist,
            Persona {
                id: PersonaId::Scientist,
                name: "The Scientist".to_string(),
                system_prompt: include_str!("../../../prompt/scientist.md").to_string(),
                description: "Hypothesis-driven reasoning backed by evidence".to_string(),
                color: 0x00CED1, // Scientific cyan
            },
        );

        personas.insert(
            PersonaId::Analyst,
            Persona {
                id: PersonaId::Analyst,
                name: "Senior Analyst".to_string(),
                system_prompt: include_str!("../../../prompt/analyst.md").to_string(),
                description: "Structured, metric-focused business insight".to_string(),
                color: 0x3498DB, // Professional blue
            },
        );

        personas.insert(
            PersonaId::Teacher,
            Persona {
                id: PersonaId::Teacher,
                name: "Teacher".to_string(),
                system_prompt: include_str!("../../../prompt/teacher.md").to_string(),
                description: "Step-by-step explanations in simple language".to_string(),
                color: 0x27AE60, // Educational green
            },
        );

        PersonaManager { personas }
    }

    pub fn get_persona(&self, id: PersonaId) -> Option<&Persona> {
        self.personas.get(&id)
    }

    /// Resolve a textual identifier coming from a front-end
    pub fn resolve(&self, name: &str) -> Result<&Persona, AssistantError> {
        let id: PersonaId = name.parse()?;
        self.get_persona(id)
            .ok_or_else(|| AssistantError::UnknownPersona(name.to_string()))
    }

    /// Instruction text for a persona
    pub fn get_system_prompt(&self, id: PersonaId) -> Result<&str, AssistantError> {
        self.get_persona(id)
            .map(|p| p.system_prompt.as_str())
            .ok_or_else(|| AssistantError::UnknownPersona(id.to_string()))
    }

    /// Personas in display order
    pub fn list_personas(&self) -> Vec<&Persona> {
        PersonaId::ALL
            .iter()
            .filter_map(|id| self.personas.get(id))
            .collect()
    }
}
