//! # TUI UI Components
//!
//! Ratatui-based rendering for the chat screen.

mod sidebar;
mod transcript;

pub use sidebar::render_sidebar;
pub use transcript::{render_input, render_transcript, wrapped_height};

use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Chat + sidebar
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Transcript and input
            Constraint::Length(30), // Persona and creativity
        ])
        .split(rows[0]);

    let chat = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Transcript
            Constraint::Length(3), // Input line
        ])
        .split(columns[0]);

    render_transcript(frame, app, chat[0]);
    render_input(frame, app, chat[1]);
    render_sidebar(frame, app, columns[1]);
    render_status_bar(frame, app, rows[1]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let state = if app.busy {
        Span::styled("● Waiting", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("● Ready", Style::default().fg(Color::Green))
    };

    let message = if let Some(err) = &app.error_message {
        Span::styled(format!(" Error: {err} "), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        Span::styled(format!(" {status} "), Style::default().fg(Color::Green))
    } else {
        Span::raw("")
    };

    let help_hint = Span::styled(
        " Enter:Send ^L:Clear Tab:Persona ^↑/^↓:Creativity Esc:Quit ",
        Style::default().fg(Color::Gray),
    );

    let status_line = Line::from(vec![state, Span::raw(" |"), message, Span::raw(" "), help_hint]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Helper to create a block with title
pub fn titled_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
}

/// Convert a 0xRRGGBB persona accent into a terminal color
pub fn accent_color(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}
