// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions, computed once per frame.
pub struct AppLayout {
    pub input: Rect,
    pub report: Rect,
    pub summary: Rect,
    pub footer: Rect,
    /// Zero-sized when the log panel is hidden.
    pub log_panel: Rect,
}

/// Splits the frame into the input box on top, the content row in the middle
/// and a two-line footer (key hints, export status).
///
/// The content row holds the analysis report and the summary side by side,
/// with a third column for the log tail when `show_logs` is set.
pub fn create_layout(frame_size: Rect, show_logs: bool) -> AppLayout {
    let [input, content, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(2)])
        .areas(frame_size);

    if show_logs {
        let [report, summary, log_panel] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(25),
                Constraint::Percentage(30),
            ])
            .areas(content);
        AppLayout { input, report, summary, footer, log_panel }
    } else {
        let [report, summary] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .areas(content);
        AppLayout { input, report, summary, footer, log_panel: Rect::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_panel_only_exists_when_shown() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(create_layout(area, false).log_panel, Rect::default());
        let with_logs = create_layout(area, true);
        assert!(with_logs.log_panel.width > 0);
        assert_eq!(with_logs.input.height, 3);
        assert_eq!(with_logs.footer.height, 2);
    }
}
