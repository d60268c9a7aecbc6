//! Session state behind the submit and clear actions

use super::{validate_temperature, ConversationHistory, TurnProcessor};
use crate::core::{AssistantError, Config};
use crate::features::completion::service_from_config;
use crate::features::personas::{Persona, PersonaId, PersonaManager};
use log::info;

/// One conversation as a front-end sees it: transcript, selected persona,
/// and the creativity setting. Turns run one at a time.
pub struct ChatSession {
    processor: TurnProcessor,
    history: ConversationHistory,
    /// Persona that wrote each assistant message, in transcript order
    reply_personas: Vec<PersonaId>,
    persona: PersonaId,
    temperature: f32,
}

impl ChatSession {
    pub fn new(processor: TurnProcessor, persona: PersonaId, temperature: f32) -> Result<Self, AssistantError> {
        Ok(Self {
            processor,
            history: ConversationHistory::new(),
            reply_personas: Vec::new(),
            persona,
            temperature: validate_temperature(temperature)?,
        })
    }

    /// Wire the configured backend, persona defaults, and timeout
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let service = service_from_config(config)?;
        let processor = TurnProcessor::new(PersonaManager::new(), service)
            .with_timeout(config.request_timeout);
        info!(
            "Session ready: provider {}, model {}, persona {}",
            config.provider, config.model, config.default_persona
        );
        Ok(Self::new(
            processor,
            config.default_persona,
            config.default_temperature,
        )?)
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn persona(&self) -> PersonaId {
        self.persona
    }

    pub fn persona_details(&self) -> Option<&Persona> {
        self.processor.persona_manager().get_persona(self.persona)
    }

    /// Who answered: one entry per assistant message in the history
    pub fn reply_personas(&self) -> &[PersonaId] {
        &self.reply_personas
    }

    pub fn persona_info(&self, id: PersonaId) -> Option<&Persona> {
        self.processor.persona_manager().get_persona(id)
    }

    pub fn personas(&self) -> Vec<&Persona> {
        self.processor.persona_manager().list_personas()
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn set_persona(&mut self, persona: PersonaId) {
        if persona != self.persona {
            info!("Persona switched from {} to {}", self.persona, persona);
            self.persona = persona;
        }
    }

    /// Select a persona by its textual identifier
    pub fn select_persona(&mut self, name: &str) -> Result<PersonaId, AssistantError> {
        let id = self.processor.persona_manager().resolve(name)?.id;
        self.set_persona(id);
        Ok(id)
    }

    pub fn set_temperature(&mut self, temperature: f32) -> Result<f32, AssistantError> {
        self.temperature = validate_temperature(temperature)?;
        Ok(self.temperature)
    }

    /// Move the temperature by `delta`, clamped to the slider range and
    /// snapped to one decimal.
    pub fn nudge_temperature(&mut self, delta: f32) -> f32 {
        let stepped = ((self.temperature + delta) * 10.0).round() / 10.0;
        self.temperature = stepped.clamp(0.0, 1.0);
        self.temperature
    }

    /// Submit user text. Returns the assistant reply; the transcript gains the
    /// user and assistant messages only when the turn succeeds.
    pub async fn submit(&mut self, text: &str) -> Result<String, AssistantError> {
        let reply = self
            .processor
            .run_turn(text, &mut self.history, self.temperature, self.persona.as_str())
            .await?;
        self.reply_personas.push(self.persona);
        Ok(reply)
    }

    /// Drop the whole transcript
    pub fn clear(&mut self) {
        info!("Clearing conversation ({} messages)", self.history.len());
        self.history.clear();
        self.reply_personas.clear();
    }
}
