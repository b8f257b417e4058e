// src/app.rs

use chrono::Utc;
use color_eyre::eyre::Result;
use ratatui::widgets::{ListState, ScrollbarState};
use std::path::PathBuf;
use strum::IntoEnumIterator;
use vanguard_audit::core::knowledge_base::Category;
use vanguard_audit::core::models::{Finding, ScanReport, Severity};
use vanguard_audit::logging;

pub const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// How many trailing log lines the log panel shows.
const LOG_TAIL_LINES: usize = 200;

pub enum ExportStatus {
    Idle,
    Success(String),
    Error(String),
}

pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

/// Outcome of one category in the summary pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStatus {
    Passed,
    Failed,
    /// No findings, but some probes could not be decided.
    Undetermined,
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub score: u8,
    pub critical_issues: usize,
    pub warning_issues: usize,
    pub info_issues: usize,
    pub inconclusive_checks: usize,
    /// Status per category, in report order.
    pub categories: Vec<(Category, CategoryStatus)>,
}

impl ScanSummary {
    /// False when any category could not be fully checked, so the score
    /// only covers part of the site.
    pub fn is_complete(&self) -> bool {
        self.categories.iter().all(|(_, status)| *status != CategoryStatus::Undetermined)
    }
}

pub struct App {
    pub should_quit: bool,
    pub show_disclaimer: bool,
    pub state: AppState,
    pub input: String,
    pub scan_report: Option<ScanReport>,
    pub scan_error: Option<String>,
    pub all_findings: Vec<Finding>,
    pub analysis_list_state: ListState,
    pub summary: ScanSummary,
    pub displayed_score: u8,
    pub spinner_frame: usize,
    pub export_status: ExportStatus,
    pub show_logs: bool,
    pub log_content: Vec<String>,
    pub log_horizontal_scroll: usize,
    pub log_horizontal_scroll_state: ScrollbarState,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            show_disclaimer: true,
            state: AppState::Idle,
            input: String::new(),
            scan_report: None,
            scan_error: None,
            all_findings: Vec::new(),
            analysis_list_state: ListState::default(),
            summary: ScanSummary::default(),
            displayed_score: 0,
            spinner_frame: 0,
            export_status: ExportStatus::Idle,
            show_logs: false,
            log_content: Vec::new(),
            log_horizontal_scroll: 0,
            log_horizontal_scroll_state: ScrollbarState::default(),
        }
    }

    /// Stores a finished scan and selects its first finding.
    pub fn finish_scan(&mut self, outcome: Result<ScanReport, String>) {
        match outcome {
            Ok(report) => {
                self.all_findings = report.results.all_findings().cloned().collect();
                self.scan_report = Some(report);
                self.scan_error = None;
            }
            Err(e) => {
                self.all_findings.clear();
                self.scan_report = None;
                self.scan_error = Some(e);
            }
        }
        self.analysis_list_state
            .select(if self.all_findings.is_empty() { None } else { Some(0) });
        self.state = AppState::Finished;
        self.update_summary();
    }

    pub fn select_previous(&mut self) {
        if self.all_findings.is_empty() {
            return;
        }
        let i = self.analysis_list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.analysis_list_state.select(Some(i));
    }

    pub fn select_next(&mut self) {
        if self.all_findings.is_empty() {
            return;
        }
        let last = self.all_findings.len() - 1;
        let i = self.analysis_list_state.selected().map_or(0, |i| (i + 1).min(last));
        self.analysis_list_state.select(Some(i));
    }

    pub fn scroll_logs_left(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_sub(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn scroll_logs_right(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_add(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if self.show_logs {
            self.refresh_logs();
        }
    }

    pub fn update_summary(&mut self) {
        let Some(report) = &self.scan_report else {
            self.summary = ScanSummary::default();
            return;
        };
        let results = &report.results;

        let criticals = results.count_by_severity(Severity::Critical);
        let warnings = results.count_by_severity(Severity::Warning);
        let score = 100_i16
            .saturating_sub((criticals * 15) as i16)
            .saturating_sub((warnings * 5) as i16);

        self.summary = ScanSummary {
            score: score.max(0) as u8,
            critical_issues: criticals,
            warning_issues: warnings,
            info_issues: results.count_by_severity(Severity::Info),
            inconclusive_checks: results.inconclusive().count(),
            categories: Category::iter()
                .map(|c| {
                    let status = if !results.findings(c).is_empty() {
                        CategoryStatus::Failed
                    } else if !results.inconclusive_in(c).is_empty() {
                        CategoryStatus::Undetermined
                    } else {
                        CategoryStatus::Passed
                    };
                    (c, status)
                })
                .collect(),
        };
    }

    /// Advances the spinner, eases the gauge toward the score and refreshes
    /// the log panel.
    pub fn on_tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        if matches!(self.state, AppState::Finished) && self.displayed_score < self.summary.score {
            self.displayed_score = (self.displayed_score + 2).min(self.summary.score);
        }
        if self.show_logs {
            self.refresh_logs();
        }
    }

    fn refresh_logs(&mut self) {
        if let Ok(content) = std::fs::read_to_string(logging::log_file_path()) {
            let lines: Vec<&str> = content.lines().collect();
            let start = lines.len().saturating_sub(LOG_TAIL_LINES);
            self.log_content = lines[start..].iter().map(|l| l.to_string()).collect();
        }
    }

    /// Writes the current report as pretty JSON into the data directory.
    pub fn export_report(&mut self) {
        self.export_status = match &self.scan_report {
            Some(report) => match write_report_json(report) {
                Ok(path) => ExportStatus::Success(path.display().to_string()),
                Err(e) => ExportStatus::Error(e.to_string()),
            },
            None => ExportStatus::Error("Nothing to export.".to_string()),
        };
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.scan_report = None;
        self.scan_error = None;
        self.all_findings.clear();
        self.analysis_list_state = ListState::default();
        self.summary = ScanSummary::default();
        self.displayed_score = 0;
        self.export_status = ExportStatus::Idle;
    }
}

fn write_report_json(report: &ScanReport) -> Result<PathBuf> {
    let directory = logging::get_data_dir().join("reports");
    std::fs::create_dir_all(&directory)?;
    let path = directory.join(format!("report-{}.json", Utc::now().format("%Y%m%d-%H%M%S")));
    std::fs::write(&path, serde_json::to_string_pretty(report)?)?;
    tracing::info!(path = %path.display(), "Report exported.");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanguard_audit::core::models::{InconclusiveCheck, ScanResults, SectionOutcome};

    fn finished_app(leakage: SectionOutcome, headers: SectionOutcome) -> App {
        let mut results = ScanResults::new();
        results.record(Category::InformationLeakage, leakage);
        results.record(Category::SecurityHeaders, headers);
        let report = ScanReport {
            target: "http://example.com/".to_string(),
            scanned_at: Utc::now(),
            results,
        };
        let mut app = App::new();
        app.finish_scan(Ok(report));
        app
    }

    fn findings(items: &[(&str, Severity)]) -> SectionOutcome {
        SectionOutcome {
            findings: items.iter().map(|(code, sev)| Finding::new(code, *sev, *code)).collect(),
            inconclusive: Vec::new(),
        }
    }

    fn undecided(codes: &[&str]) -> SectionOutcome {
        SectionOutcome {
            findings: Vec::new(),
            inconclusive: codes
                .iter()
                .map(|code| InconclusiveCheck {
                    code: code.to_string(),
                    url: "http://example.com/".to_string(),
                    reason: "connection refused".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn exposed_site_loses_points_per_severity() {
        let app = finished_app(
            findings(&[("LEAK_GIT_HEAD", Severity::Critical), ("LEAK_X_POWERED_BY", Severity::Info)]),
            findings(&[
                ("HEADERS_X_FRAME_OPTIONS_MISSING", Severity::Warning),
                ("HEADERS_X_CONTENT_TYPE_OPTIONS_MISSING", Severity::Warning),
                ("HEADERS_HSTS_MISSING", Severity::Warning),
            ]),
        );

        assert_eq!(app.summary.score, 70);
        assert_eq!(app.summary.critical_issues, 1);
        assert_eq!(app.summary.warning_issues, 3);
        assert_eq!(app.summary.info_issues, 1);
        assert_eq!(
            app.summary.categories,
            vec![
                (Category::InformationLeakage, CategoryStatus::Failed),
                (Category::SecurityHeaders, CategoryStatus::Failed),
            ]
        );
        assert!(app.summary.is_complete());
        assert_eq!(app.analysis_list_state.selected(), Some(0));
    }

    #[test]
    fn score_is_floored_at_zero() {
        let many: Vec<(&str, Severity)> = (0..8).map(|_| ("LEAK_GIT_HEAD", Severity::Critical)).collect();
        let app = finished_app(findings(&many), SectionOutcome::default());
        assert_eq!(app.summary.score, 0);
    }

    #[test]
    fn hardened_site_passes_everything() {
        let app = finished_app(SectionOutcome::default(), SectionOutcome::default());

        assert_eq!(app.summary.score, 100);
        assert!(app.summary.is_complete());
        assert!(
            app.summary
                .categories
                .iter()
                .all(|(_, status)| *status == CategoryStatus::Passed)
        );
        assert_eq!(app.analysis_list_state.selected(), None);
    }

    #[test]
    fn withheld_unreachable_site_is_not_a_pass() {
        let app = finished_app(
            undecided(&["LEAK_GIT_HEAD", "LEAK_X_POWERED_BY"]),
            undecided(&["HEADERS_HSTS_MISSING"]),
        );

        assert_eq!(app.summary.inconclusive_checks, 3);
        assert_eq!(
            app.summary.categories,
            vec![
                (Category::InformationLeakage, CategoryStatus::Undetermined),
                (Category::SecurityHeaders, CategoryStatus::Undetermined),
            ]
        );
        assert!(!app.summary.is_complete());
    }

    #[test]
    fn findings_outrank_undecided_probes() {
        let mut headers = undecided(&["HEADERS_HSTS_MISSING"]);
        headers.findings.push(Finding::new("HEADERS_HSTS_MISSING", Severity::Warning, "x"));
        let app = finished_app(SectionOutcome::default(), headers);

        assert_eq!(app.summary.categories[1], (Category::SecurityHeaders, CategoryStatus::Failed));
        assert_eq!(app.summary.categories[0], (Category::InformationLeakage, CategoryStatus::Passed));
    }
}
