//! # Transcript UI
//!
//! Running conversation and the input line.

use crate::features::conversation::{ConversationHistory, Role};
use crate::tui::ui::{accent_color, titled_block};
use crate::tui::App;
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// `speakers` holds a label and colour per assistant message, oldest first
fn transcript_lines(history: &ConversationHistory, speakers: &[(String, Color)]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut replies = speakers.iter();

    for message in history {
        let header = match message.role {
            Role::User => Span::styled(
                "You",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Role::Assistant => {
                let (name, accent) = replies
                    .next()
                    .cloned()
                    .unwrap_or_else(|| ("Assistant".to_string(), Color::Cyan));
                Span::styled(name, Style::default().fg(accent).add_modifier(Modifier::BOLD))
            }
        };
        lines.push(Line::from(header));

        if message.content.is_empty() {
            lines.push(Line::from(Span::styled(
                "(empty reply)",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            for text in message.content.lines() {
                lines.push(Line::from(text.to_string()));
            }
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Rows the lines take once wrapped to `width` columns
pub fn wrapped_height(lines: &[Line], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum()
}

/// Render the conversation, pinned to the bottom unless scrolled up
pub fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let history = app.session.history();
    let title = format!("Conversation ({} turns)", history.turn_count());
    let block = titled_block(&title);

    if history.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("Ask a question and press Enter."),
            Line::from("Tab switches persona, Ctrl+Up/Down sets creativity."),
        ])
        .block(block)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
        frame.render_widget(hint, area);
        return;
    }

    let speakers: Vec<(String, Color)> = app
        .session
        .reply_personas()
        .iter()
        .map(|id| match app.session.persona_info(*id) {
            Some(p) => (p.name.clone(), accent_color(p.color)),
            None => (id.to_string(), Color::Cyan),
        })
        .collect();
    let lines = transcript_lines(history, &speakers);

    let inner_width = area.width.saturating_sub(2);
    let inner_height = usize::from(area.height.saturating_sub(2));
    let total = wrapped_height(&lines, inner_width);
    let bottom = total.saturating_sub(inner_height);
    let top = bottom.saturating_sub(usize::from(app.scroll_offset));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0));

    frame.render_widget(paragraph, area);
}

pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let paragraph = Paragraph::new(app.input_buffer.as_str())
        .block(titled_block("Your message"))
        .style(style);

    frame.render_widget(paragraph, area);

    if !app.busy {
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + 1).saturating_add(app.input_buffer.chars().count() as u16);
        frame.set_cursor_position(Position::new(cursor_x.min(max_x), area.y + 1));
    }
}
