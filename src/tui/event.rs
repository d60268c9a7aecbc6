//! # TUI Event Handling
//!
//! Keyboard input and tick event handling.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// TUI events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for periodic updates
    Tick,
}

/// Event handler fed by a blocking crossterm reader thread
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let forwarded = match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        tx.send(Event::Key(key))
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => tx.send(Event::Resize(w, h)),
                    _ => Ok(()),
                };
                if forwarded.is_err() {
                    break;
                }
            } else if tx.send(Event::Tick).is_err() {
                break;
            }
        });

        EventHandler { rx }
    }

    /// Handler fed from an existing channel instead of the terminal
    pub fn from_receiver(rx: mpsc::UnboundedReceiver<Event>) -> Self {
        EventHandler { rx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    /// Send the input line as a turn
    Submit,
    /// Reset the transcript
    Clear,
    Char(char),
    Backspace,
    NextPersona,
    PreviousPersona,
    TemperatureUp,
    TemperatureDown,
    ScrollUp,
    ScrollDown,
}

/// Map a key event to an action. The input line always has focus.
pub fn map_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => KeyAction::Clear,

        (KeyCode::Enter, _) => KeyAction::Submit,
        (KeyCode::Backspace, _) => KeyAction::Backspace,

        (KeyCode::Tab, _) => KeyAction::NextPersona,
        (KeyCode::BackTab, _) => KeyAction::PreviousPersona,

        (KeyCode::Up, KeyModifiers::CONTROL) => KeyAction::TemperatureUp,
        (KeyCode::Down, KeyModifiers::CONTROL) => KeyAction::TemperatureDown,
        (KeyCode::Up, _) | (KeyCode::PageUp, _) => KeyAction::ScrollUp,
        (KeyCode::Down, _) | (KeyCode::PageDown, _) => KeyAction::ScrollDown,

        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            KeyAction::Char(c)
        }

        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key_event(key(KeyCode::Esc, KeyModifiers::NONE)), KeyAction::Quit);
        assert_eq!(
            map_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_text_entry() {
        assert_eq!(
            map_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            KeyAction::Char('q')
        );
        assert_eq!(
            map_key_event(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            KeyAction::Char('Q')
        );
        assert_eq!(
            map_key_event(key(KeyCode::Backspace, KeyModifiers::NONE)),
            KeyAction::Backspace
        );
        assert_eq!(map_key_event(key(KeyCode::Enter, KeyModifiers::NONE)), KeyAction::Submit);
    }

    #[test]
    fn test_controls() {
        assert_eq!(
            map_key_event(key(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            KeyAction::Clear
        );
        assert_eq!(map_key_event(key(KeyCode::Tab, KeyModifiers::NONE)), KeyAction::NextPersona);
        assert_eq!(
            map_key_event(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            KeyAction::PreviousPersona
        );
        assert_eq!(
            map_key_event(key(KeyCode::Up, KeyModifiers::CONTROL)),
            KeyAction::TemperatureUp
        );
        assert_eq!(
            map_key_event(key(KeyCode::Down, KeyModifiers::CONTROL)),
            KeyAction::TemperatureDown
        );
        assert_eq!(map_key_event(key(KeyCode::PageUp, KeyModifiers::NONE)), KeyAction::ScrollUp);
        assert_eq!(map_key_event(key(KeyCode::Down, KeyModifiers::NONE)), KeyAction::ScrollDown);
        assert_eq!(map_key_event(key(KeyCode::F(5), KeyModifiers::NONE)), KeyAction::None);
    }
}
