//! Turn processing pipeline
//!
//! persona lookup -> temperature check -> prompt assembly -> completion call
//! -> normalization -> history append.

use super::{validate_temperature, ConversationHistory, Message, TurnRequest, TurnResult};
use crate::core::{normalize_payload, AssistantError};
use crate::features::completion::{CompletionRequest, CompletionService};
use crate::features::personas::{PersonaManager, PromptBuilder};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;

/// Runs one user turn against the completion service.
///
/// Holds no conversation state; the caller owns the history.
#[derive(Clone)]
pub struct TurnProcessor {
    persona_manager: PersonaManager,
    service: Arc<dyn CompletionService>,
    request_timeout: Option<Duration>,
}

impl TurnProcessor {
    pub fn new(persona_manager: PersonaManager, service: Arc<dyn CompletionService>) -> Self {
        Self {
            persona_manager,
            service,
            request_timeout: None,
        }
    }

    /// Fail the turn with a service error if the completion call takes longer
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.request_timeout = Some(limit);
        self
    }

    pub fn persona_manager(&self) -> &PersonaManager {
        &self.persona_manager
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    /// Process a turn, taking the history by value and handing it back updated
    pub async fn process_turn(&self, request: TurnRequest) -> Result<TurnResult, AssistantError> {
        let TurnRequest {
            user_input,
            mut history,
            temperature,
            persona,
        } = request;

        self.run_turn(&user_input, &mut history, temperature, &persona)
            .await?;

        Ok(TurnResult {
            cleared_input: String::new(),
            updated_history: history,
        })
    }

    /// Process a turn in place and return the assistant reply.
    ///
    /// The history is only touched after the completion call succeeded, so a
    /// failed turn leaves it exactly as it was.
    pub async fn run_turn(
        &self,
        user_input: &str,
        history: &mut ConversationHistory,
        temperature: f32,
        persona: &str,
    ) -> Result<String, AssistantError> {
        let request_id = Uuid::new_v4();

        let persona = self.persona_manager.resolve(persona)?;
        let temperature = validate_temperature(temperature)?;

        let messages = PromptBuilder::new(&self.persona_manager, persona.id)
            .with_history(history.messages())
            .with_user_input(user_input)
            .build()?;

        info!(
            "[{request_id}] Turn for persona {} via {} (temperature {temperature}, {} history messages)",
            persona.id,
            self.service.name(),
            history.len()
        );

        let call = self.service.complete(CompletionRequest {
            messages,
            temperature,
            request_id,
        });

        let outcome = match self.request_timeout {
            Some(limit) => match timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(anyhow::anyhow!(
                    "Completion request timed out after {} seconds",
                    limit.as_secs_f32()
                )),
            },
            None => call.await,
        };

        let payload = outcome.map_err(|e| {
            error!("[{request_id}] Completion failed: {e:#}");
            AssistantError::Service(e)
        })?;

        let reply = normalize_payload(payload);
        debug!("[{request_id}] Got response: {} chars", reply.len());

        history.push(Message::user(user_input));
        history.push(Message::assistant(reply.clone()));

        Ok(reply)
    }
}
