//! # Sidebar UI
//!
//! Persona selector and creativity gauge.

use crate::tui::ui::{accent_color, titled_block};
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{Gauge, List, ListItem, Paragraph, Wrap};

pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Persona list
            Constraint::Min(0),    // Persona description
            Constraint::Length(3), // Creativity gauge
        ])
        .split(area);

    render_persona_list(frame, app, chunks[0]);
    render_persona_description(frame, app, chunks[1]);
    render_temperature(frame, app, chunks[2]);
}

fn render_persona_list(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.session.persona();

    let items: Vec<ListItem> = app
        .session
        .personas()
        .into_iter()
        .map(|persona| {
            let selected = persona.id == current;
            let style = if selected {
                Style::default()
                    .fg(accent_color(persona.color))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if selected { "> " } else { "  " };
            ListItem::new(format!("{prefix}{}", persona.id)).style(style)
        })
        .collect();

    let list = List::new(items).block(titled_block("AI Persona"));
    frame.render_widget(list, area);
}

fn render_persona_description(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.session.persona_details() {
        Some(persona) => vec![
            Line::from(Span::styled(
                persona.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(persona.description.clone()),
        ],
        None => vec![Line::from("No persona selected")],
    };

    let paragraph = Paragraph::new(lines)
        .block(titled_block("About"))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_temperature(frame: &mut Frame, app: &App, area: Rect) {
    let temperature = app.session.temperature();

    let gauge = Gauge::default()
        .block(titled_block("Creativity"))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(f64::from(temperature).clamp(0.0, 1.0))
        .label(format!("{temperature:.1}"));

    frame.render_widget(gauge, area);
}
