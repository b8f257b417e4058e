// src/ui/widgets/summary.rs

use crate::app::{App, AppState, CategoryStatus};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

/// Renders the summary pane: score with an animated gauge, status per
/// category, issue counts, and the probes that could not be decided.
/// Nothing is drawn inside the pane until a scan has finished.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(Block::default().borders(Borders::ALL).title("Summary"), area);

    let [score_area, gauge_area, _, checks_area, _, issues_area, _, inconclusive_area] = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Score & rating
            Constraint::Length(1), // Gauge
            Constraint::Length(1),
            Constraint::Length(3), // Category checks
            Constraint::Length(1),
            Constraint::Length(4), // Issue counts
            Constraint::Length(1),
            Constraint::Min(0), // Inconclusive probes
        ])
        .areas(area);

    if !matches!(app.state, AppState::Finished) || app.scan_report.is_none() {
        return;
    }

    // --- Score & Rating ---
    let (rating_text, rating_style) = match app.summary.score {
        _ if !app.summary.is_complete() => ("Incomplete", Style::default().fg(Color::Yellow)),
        90..=100 => ("Excellent", Style::default().fg(Color::Green)),
        75..=89 => ("Good", Style::default().fg(Color::Cyan)),
        50..=74 => ("Needs Improvement", Style::default().fg(Color::Yellow)),
        _ => ("Poor", Style::default().fg(Color::Red)),
    };
    let score_text = Text::from(vec![
        Line::from("Overall Score".bold()),
        Line::from(format!("{}/100 ({})", app.summary.score, rating_text)).style(rating_style),
    ]);
    frame.render_widget(Paragraph::new(score_text).alignment(Alignment::Center), score_area);

    let gauge_color = match app.displayed_score {
        80.. => Color::Green,
        50..=79 => Color::Yellow,
        _ => Color::Red,
    };
    let score_gauge = Gauge::default()
        .percent(u16::from(app.displayed_score))
        .label("")
        .style(Style::default().fg(gauge_color));
    frame.render_widget(score_gauge, gauge_area);

    // --- Category Checks ---
    let checks_lines: Vec<Line> = app
        .summary
        .categories
        .iter()
        .map(|(category, status)| {
            let (icon, style) = match status {
                CategoryStatus::Passed => ("✓", Style::default().fg(Color::Green)),
                CategoryStatus::Failed => ("✗", Style::default().fg(Color::Red)),
                CategoryStatus::Undetermined => ("?", Style::default().fg(Color::Yellow)),
            };
            Line::from(vec![Span::styled(format!("{icon} "), style), Span::raw(category.to_string())])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(checks_lines).block(Block::default().title("SECURITY CHECKS".bold())),
        checks_area,
    );

    // --- Issue Counts ---
    let counts = |label: &'static str, n: usize, color: Color| {
        Line::from(vec![Span::raw(label), Span::styled(n.to_string(), Style::default().fg(color))])
    };
    let details_text = Text::from(vec![
        counts("Critical: ", app.summary.critical_issues, Color::Red),
        counts("Warnings: ", app.summary.warning_issues, Color::Yellow),
        counts("Info:     ", app.summary.info_issues, Color::Cyan),
    ]);
    frame.render_widget(
        Paragraph::new(details_text).block(Block::default().title("ISSUES FOUND".bold())),
        issues_area,
    );

    // --- Inconclusive Probes ---
    let mut inconclusive_lines = Vec::new();
    if let Some(report) = &app.scan_report {
        if app.summary.inconclusive_checks == 0 {
            inconclusive_lines.push(Line::from("Every probe got an answer.".green()));
        } else {
            for check in report.results.inconclusive() {
                inconclusive_lines.push(Line::from(vec![
                    Span::raw("- "),
                    Span::styled(check.url.clone(), Style::default().fg(Color::Yellow)),
                    Span::raw(format!(": {}", check.reason)),
                ]));
            }
        }
    }
    let title = format!("INCONCLUSIVE ({})", app.summary.inconclusive_checks);
    frame.render_widget(
        Paragraph::new(inconclusive_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(Span::styled(title, Style::new().bold()))),
        inconclusive_area,
    );
}
