//! # TUI Application Core
//!
//! Chat screen state on top of a `ChatSession`.

use crate::features::conversation::ChatSession;
use crate::tui::event::{map_key_event, Event, EventHandler, KeyAction};
use log::{info, warn};

/// Temperature change per keypress, matching a 0.1-step slider
pub const TEMPERATURE_STEP: f32 = 0.1;

/// Main application state
pub struct App {
    /// Conversation, persona and temperature
    pub session: ChatSession,
    /// Text being typed
    pub input_buffer: String,
    /// Whether the app should quit
    pub should_quit: bool,
    /// A turn is in flight
    pub busy: bool,
    /// Lines scrolled up from the bottom of the transcript
    pub scroll_offset: u16,
    /// Error message to display
    pub error_message: Option<String>,
    /// Status message to display
    pub status_message: Option<String>,
}

impl App {
    pub fn new(session: ChatSession) -> Self {
        App {
            session,
            input_buffer: String::new(),
            should_quit: false,
            busy: false,
            scroll_offset: 0,
            error_message: None,
            status_message: None,
        }
    }

    /// Apply a key action. Returns the text to submit when the action starts
    /// a turn; the caller redraws and then awaits `submit`.
    pub fn handle_action(&mut self, action: KeyAction) -> Option<String> {
        if self.busy && action != KeyAction::Quit {
            return None;
        }

        match action {
            KeyAction::None => {}
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Char(c) => self.input_buffer.push(c),
            KeyAction::Backspace => {
                self.input_buffer.pop();
            }
            KeyAction::Submit => {
                if self.input_buffer.trim().is_empty() {
                    return None;
                }
                self.busy = true;
                self.clear_error();
                self.status_message = Some("Thinking...".to_string());
                // Input field is cleared as soon as the turn starts
                return Some(std::mem::take(&mut self.input_buffer));
            }
            KeyAction::Clear => {
                self.session.clear();
                self.scroll_offset = 0;
                self.clear_error();
                self.status_message = Some("Conversation cleared".to_string());
            }
            KeyAction::NextPersona => {
                let next = self.session.persona().next();
                self.session.set_persona(next);
                self.status_message = Some(format!("Persona: {next}"));
            }
            KeyAction::PreviousPersona => {
                let previous = self.session.persona().previous();
                self.session.set_persona(previous);
                self.status_message = Some(format!("Persona: {previous}"));
            }
            KeyAction::TemperatureUp => {
                let t = self.session.nudge_temperature(TEMPERATURE_STEP);
                self.status_message = Some(format!("Creativity: {t:.1}"));
            }
            KeyAction::TemperatureDown => {
                let t = self.session.nudge_temperature(-TEMPERATURE_STEP);
                self.status_message = Some(format!("Creativity: {t:.1}"));
            }
            KeyAction::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_add(1),
            KeyAction::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_sub(1),
        }
        None
    }

    /// Run a turn. On failure the typed text goes back into the input line.
    pub async fn submit(&mut self, text: String) {
        match self.session.submit(&text).await {
            Ok(_) => {
                self.scroll_offset = 0;
                self.status_message = None;
            }
            Err(e) => {
                warn!("Turn failed: {e}");
                self.input_buffer = text;
                self.status_message = None;
                self.error_message = Some(e.to_string());
            }
        }
        self.busy = false;
    }

    /// Run a turn while still reading keys, so quit works mid-request.
    ///
    /// Other keys are dropped until the reply arrives. Quitting abandons the
    /// turn before anything is appended to the transcript.
    pub async fn submit_or_quit(&mut self, text: String, events: &mut EventHandler) {
        let quit = {
            let turn = self.submit(text);
            tokio::pin!(turn);
            loop {
                tokio::select! {
                    _ = &mut turn => break false,
                    event = events.next() => match event {
                        Some(Event::Key(key)) if map_key_event(key) == KeyAction::Quit => break true,
                        None => break true,
                        _ => {}
                    },
                }
            }
        };

        if quit {
            info!("Quit while a turn was in flight, abandoning it");
            self.busy = false;
            self.should_quit = true;
        }
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
