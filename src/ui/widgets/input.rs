// src/ui/widgets/input.rs
use crate::app::{App, AppState};
use ratatui::{
    layout::Position,
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Renders the target URL box. The cursor is shown only while typing.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.state {
        AppState::Idle => "Target URL (https:// is assumed when omitted)",
        _ => "Target URL",
    };
    let input_paragraph = Paragraph::new(app.input.as_str())
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(input_paragraph, area);

    if matches!(app.state, AppState::Idle) && !app.show_disclaimer {
        let offset = app.input.chars().count() as u16;
        frame.set_cursor_position(Position::new(area.x + offset + 1, area.y + 1));
    }
}
