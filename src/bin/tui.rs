//! # Persona Assistant TUI
//!
//! Terminal chat with persona selector and creativity gauge.
//!
//! Usage: `cargo run --features tui --bin assistant-tui`

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dotenvy::dotenv;
use log::{error, info};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;

use persona_assistant::core::{Config, Provider};
use persona_assistant::tui::event::map_key_event;
use persona_assistant::tui::{App, Event, EventHandler};
use persona_assistant::ChatSession;

/// TUI refresh rate
const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // The openai crate reads its key from the environment, not from our config
    if config.provider == Provider::OpenAi {
        std::env::set_var("OPENAI_API_KEY", &config.api_key);
        std::env::set_var("OPENAI_KEY", &config.api_key);
    }

    // Logging to stderr would tear the alternate screen, keep it quiet by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    info!("Starting persona assistant TUI...");

    let session = ChatSession::from_config(&config)?;
    let mut app = App::new(session);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("Application error: {e}");
        return Err(e);
    }

    info!("TUI shutdown complete");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            persona_assistant::tui::ui::render(frame, app);
        })?;

        match events.next().await {
            Some(Event::Key(key)) => {
                if let Some(text) = app.handle_action(map_key_event(key)) {
                    // Show the waiting state before blocking on the turn
                    terminal.draw(|frame| {
                        persona_assistant::tui::ui::render(frame, app);
                    })?;
                    app.submit_or_quit(text, events).await;
                }
            }
            Some(Event::Resize(_, _)) | Some(Event::Tick) => {}
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
