//! # Line-Oriented Front-End
//!
//! Reads one line per action from any async reader. Plain text is submitted
//! as a turn, lines starting with `/` are commands.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Submit, clear, persona and temperature commands

use crate::features::conversation::ChatSession;
use anyhow::Result;
use log::{debug, error};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP_TEXT: &str = "\
Commands:
  /persona <name>   switch persona (Scientist, Analyst, Teacher)
  /personas         list personas
  /temp <0.0-1.0>   set creativity
  /clear            clear the conversation
  /history          print the transcript
  /help             show this help
  /quit             exit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Submit(String),
    Persona(String),
    ListPersonas,
    Temperature(String),
    Clear,
    History,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parse a raw input line
pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Empty;
    }

    let Some(command) = trimmed.strip_prefix('/') else {
        // Submitted text stays verbatim apart from the line terminator
        return ReplCommand::Submit(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name.to_lowercase().as_str() {
        "persona" | "p" => ReplCommand::Persona(arg.to_string()),
        "personas" => ReplCommand::ListPersonas,
        "temp" | "temperature" | "t" => ReplCommand::Temperature(arg.to_string()),
        "clear" => ReplCommand::Clear,
        "history" => ReplCommand::History,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => ReplCommand::Unknown(other.to_string()),
    }
}

fn prompt_marker(session: &ChatSession) -> String {
    format!("[{} @ {:.1}]> ", session.persona(), session.temperature())
}

/// Drive a session until `/quit` or end of input
pub async fn run_repl<R, W>(session: &mut ChatSession, reader: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();

    writeln!(out, "Persona assistant. Type /help for commands.")?;
    write!(out, "{}", prompt_marker(session))?;
    out.flush()?;

    while let Some(line) = lines.next_line().await? {
        let command = parse_line(&line);
        debug!("REPL command: {command:?}");

        match command {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::Help => writeln!(out, "{HELP_TEXT}")?,
            ReplCommand::ListPersonas => {
                for persona in session.personas() {
                    let marker = if persona.id == session.persona() { '*' } else { ' ' };
                    writeln!(out, "{marker} {:<10} {}", persona.id, persona.description)?;
                }
            }
            ReplCommand::Persona(name) => match session.select_persona(&name) {
                Ok(id) => writeln!(out, "Persona set to {id}")?,
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            ReplCommand::Temperature(raw) => match raw.parse::<f32>() {
                Ok(value) => match session.set_temperature(value) {
                    Ok(t) => writeln!(out, "Temperature set to {t:.1}")?,
                    Err(e) => writeln!(out, "Error: {e}")?,
                },
                Err(_) => writeln!(out, "Error: temperature must be a number between 0 and 1")?,
            },
            ReplCommand::Clear => {
                session.clear();
                writeln!(out, "Conversation cleared.")?;
            }
            ReplCommand::History => {
                if session.history().is_empty() {
                    writeln!(out, "(no messages yet)")?;
                }
                for message in session.history() {
                    writeln!(out, "{}: {}", message.role, message.content)?;
                }
            }
            ReplCommand::Unknown(name) => {
                writeln!(out, "Unknown command /{name}. Type /help for commands.")?
            }
            ReplCommand::Submit(text) => match session.submit(&text).await {
                Ok(reply) => {
                    let speaker = session
                        .persona_details()
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| session.persona().to_string());
                    writeln!(out, "{speaker}: {reply}")?;
                }
                Err(e) => {
                    error!("Turn failed: {e}");
                    writeln!(out, "Error: {e}")?;
                }
            },
        }

        write!(out, "{}", prompt_marker(session))?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::completion::mock::{FailingService, ScriptedService};
    use crate::features::conversation::{Message, TurnProcessor};
    use crate::features::personas::{PersonaId, PersonaManager};

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(
            parse_line("  What is gravity?\n"),
            ReplCommand::Submit("  What is gravity?".to_string())
        );
        assert_eq!(parse_line("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("/persona Teacher"), ReplCommand::Persona("Teacher".to_string()));
        assert_eq!(parse_line("/p  analyst "), ReplCommand::Persona("analyst".to_string()));
        assert_eq!(parse_line("/personas"), ReplCommand::ListPersonas);
        assert_eq!(parse_line("/temp 0.7"), ReplCommand::Temperature("0.7".to_string()));
        assert_eq!(parse_line("/CLEAR"), ReplCommand::Clear);
        assert_eq!(parse_line("/history"), ReplCommand::History);
        assert_eq!(parse_line("/help"), ReplCommand::Help);
        assert_eq!(parse_line("/quit"), ReplCommand::Quit);
        assert_eq!(parse_line("/dance"), ReplCommand::Unknown("dance".to_string()));
    }

    fn session(service: std::sync::Arc<dyn crate::features::CompletionService>) -> ChatSession {
        ChatSession::new(
            TurnProcessor::new(PersonaManager::new(), service),
            PersonaId::Scientist,
            0.5,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_repl_conversation_flow() {
        let mut session = session(ScriptedService::text(" Gravity is a force... "));
        let input: &[u8] = b"/persona teacher\nWhat is gravity?\n/quit\nignored\n";
        let mut out = Vec::new();

        run_repl(&mut session, input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Persona set to Teacher"));
        assert!(printed.contains("Teacher: Gravity is a force..."));
        assert_eq!(
            session.history().messages(),
            &[
                Message::user("What is gravity?"),
                Message::assistant("Gravity is a force..."),
            ]
        );
    }

    #[tokio::test]
    async fn test_repl_clear_and_settings() {
        let mut session = session(ScriptedService::text("ok"));
        let input: &[u8] = b"hello\n/temp 0.8\n/temp 3\n/temp warm\n/persona Philosopher\n/clear\n";
        let mut out = Vec::new();

        run_repl(&mut session, input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Temperature set to 0.8"));
        assert!(printed.contains("outside the allowed range"));
        assert!(printed.contains("must be a number"));
        assert!(printed.contains("Unknown persona: Philosopher"));
        assert!(printed.contains("Conversation cleared."));
        assert!(session.history().is_empty());
        assert_eq!(session.temperature(), 0.8);
        assert_eq!(session.persona(), PersonaId::Scientist);
    }

    #[tokio::test]
    async fn test_repl_reports_service_errors_and_continues() {
        let mut session = session(FailingService::new());
        let input: &[u8] = b"hello\n/history\n";
        let mut out = Vec::new();

        run_repl(&mut session, input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Error: Completion service error: connection refused"));
        assert!(printed.contains("(no messages yet)"));
    }
}
