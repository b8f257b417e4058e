// src/ui/widgets/analysis_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use vanguard_audit::core::knowledge_base::{self, Category};
use vanguard_audit::core::models::Severity;

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Critical => Style::default().fg(Color::Red),
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Info => Style::default().fg(Color::Cyan),
    }
}

fn category_prefix(category: Category) -> &'static str {
    match category {
        Category::InformationLeakage => "[LEAK] ",
        Category::SecurityHeaders => "[HEADERS] ",
    }
}

pub fn render_analysis_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Analysis Report (Navigate with ↑ ↓)");

    if !matches!(app.state, AppState::Finished) {
        let content = match app.state {
            AppState::Idle => Paragraph::new("Scan results will appear here...").alignment(Alignment::Center),
            AppState::Scanning => Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", SPINNER_CHARS[app.spinner_frame]), Style::default().fg(Color::Cyan)),
                Span::raw("Scanning... Please wait."),
            ]))
            .alignment(Alignment::Center),
            AppState::Finished => Paragraph::new(""),
        };
        frame.render_widget(content.block(main_block), area);
        return;
    }

    if let Some(error) = &app.scan_error {
        let p = Paragraph::new(vec![
            Line::from("SCAN COULD NOT START".red().bold()),
            Line::from(""),
            Line::from(error.as_str()),
            Line::from(""),
            Line::from("Press N to enter a different target."),
        ])
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(main_block);
        frame.render_widget(p, area);
        return;
    }

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let [list_area, detail_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Min(0)])
        .areas(inner_area);

    let items: Vec<ListItem> = app
        .all_findings
        .iter()
        .map(|f| {
            let prefix = knowledge_base::get_check(&f.code).map_or("", |c| category_prefix(c.category));
            ListItem::new(Line::from(vec![
                Span::styled(prefix, Style::default().fg(Color::DarkGray)),
                Span::styled(f.message.clone(), severity_style(f.severity)),
            ]))
        })
        .collect();

    let findings_list = List::new(items)
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(findings_list, list_area, &mut app.analysis_list_state);

    let detail_block = Block::default().borders(Borders::TOP).title("Details");
    let selected = app
        .analysis_list_state
        .selected()
        .and_then(|i| app.all_findings.get(i))
        .and_then(|f| knowledge_base::get_check(&f.code));

    match selected {
        Some(check) => {
            let text = vec![
                Line::from(check.title.bold()),
                Line::from(""),
                Line::from("WHAT IT IS:".yellow().bold()),
                Line::from(check.description),
                Line::from(""),
                Line::from("HOW TO FIX:".yellow().bold()),
                Line::from(check.remediation),
            ];
            let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(detail_block);
            frame.render_widget(p, detail_area);
        }
        None => render_placeholder_details(frame, app, detail_block, detail_area),
    }
}

fn render_placeholder_details(frame: &mut Frame, app: &App, block: Block, area: Rect) {
    let placeholder_text = if app.all_findings.is_empty() && app.summary.inconclusive_checks == 0 {
        Text::from(vec![
            Line::from(""),
            Line::from("✓ NOTHING TO REPORT".bold().fg(Color::Green)),
            Line::from(""),
            Line::from("No exposed files were found and every security header is set."),
        ])
    } else if app.all_findings.is_empty() {
        Text::from(vec![
            Line::from(""),
            Line::from("NO FINDINGS, BUT SOME CHECKS WERE INCONCLUSIVE".bold().fg(Color::Yellow)),
            Line::from(""),
            Line::from("The target could not be reached for every probe. See the summary."),
        ])
    } else {
        Text::from("Select an item above to see details.")
    };

    let p = Paragraph::new(placeholder_text).alignment(Alignment::Center).block(block);
    frame.render_widget(p, area);
}
