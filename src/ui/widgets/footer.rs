// src/ui/widgets/footer.rs

use crate::app::{App, AppState, ExportStatus};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the key hints and, below them, the outcome of the last export.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.show_disclaimer {
        Line::from(vec![Span::raw("Press "), key("Enter"), Span::raw(" to continue, "), key("Esc"), Span::raw(" to quit.")])
    } else {
        match app.state {
            AppState::Idle => Line::from(vec![
                Span::raw("Press "),
                key("Enter"),
                Span::raw(" to scan, "),
                key("Esc"),
                Span::raw(" to quit."),
            ]),
            AppState::Finished => Line::from(vec![
                key("[N]"),
                Span::raw("ew Scan, "),
                key("[E]"),
                Span::raw("xport, "),
                key("[L]"),
                Span::raw("ogs, "),
                key("[Q]"),
                Span::raw("uit"),
            ]),
            AppState::Scanning => Line::from("Scanning... Press Q to quit."),
        }
    };

    let status = match &app.export_status {
        ExportStatus::Idle => Line::from(""),
        ExportStatus::Success(path) => Line::from(Span::styled(format!("Report exported to {path}"), Style::new().fg(Color::Green))),
        ExportStatus::Error(e) => Line::from(Span::styled(format!("Export failed: {e}"), Style::new().fg(Color::Red))),
    };

    let footer = Paragraph::new(vec![hints, status]).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
