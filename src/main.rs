// src/main.rs

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    ExecutableCommand,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};
use vanguard_audit::core::config::ScanConfig;
use vanguard_audit::core::models::ScanReport;
use vanguard_audit::core::scanner::{Scanner, run_full_scan};
use vanguard_audit::logging::{self, LogMode};

mod app;
mod ui;

use app::{App, AppState};

/// Audits a website for exposed sensitive files and missing security headers.
///
/// With a URL the report is printed to stdout. Without one the interactive
/// terminal UI starts.
#[derive(Parser, Debug)]
#[command(name = "vanguard-audit", version, about)]
struct Cli {
    /// Base URL of the site to audit (e.g. https://example.com)
    url: Option<String>,
}

type ScanOutcome = std::result::Result<ScanReport, String>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = ScanConfig::from_env()?;

    match cli.url {
        Some(url) => {
            logging::initialize_logging(LogMode::Cli)?;
            run_cli(&url, &config).await
        }
        None => {
            logging::initialize_logging(LogMode::Tui)?;
            run_tui(config).await
        }
    }
}

/// One-shot mode: scan `url` and print the report.
async fn run_cli(url: &str, config: &ScanConfig) -> Result<()> {
    let mut scanner = Scanner::with_config(url, config).wrap_err("cannot audit the given URL")?;
    scanner.run().await;
    scanner.print_results()?;
    Ok(())
}

async fn run_tui(config: ScanConfig) -> Result<()> {
    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<ScanOutcome>(1);

    let loop_result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            if event::poll(Duration::from_millis(100))? {
                handle_events(&mut app, &tx, &config)?;
            }

            if let Ok(outcome) = rx.try_recv() {
                app.finish_scan(outcome);
            }
            app.on_tick();
        }
        Ok::<(), color_eyre::eyre::Report>(())
    }
    .await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    loop_result
}

/// Routes a key press to the handler for the current state.
fn handle_events(app: &mut App, tx: &mpsc::Sender<ScanOutcome>, config: &ScanConfig) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if app.show_disclaimer {
            match key.code {
                KeyCode::Enter => app.show_disclaimer = false,
                KeyCode::Esc => app.quit(),
                _ => {}
            }
            return Ok(());
        }
        match app.state {
            AppState::Idle => handle_idle_input(app, key.code, tx, config),
            AppState::Finished => handle_finished_input(app, key.code),
            AppState::Scanning => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    app.quit();
                }
            }
        }
    }
    Ok(())
}

/// Handles input while the user is typing a target.
fn handle_idle_input(app: &mut App, key_code: KeyCode, tx: &mpsc::Sender<ScanOutcome>, config: &ScanConfig) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Enter => {
            let target = with_default_scheme(app.input.trim());
            if target.is_empty() {
                return;
            }
            app.state = AppState::Scanning;
            info!(url = %target, "Scan requested from the UI.");

            let tx_clone = tx.clone();
            let config = config.clone();
            tokio::spawn(async move {
                let outcome = run_full_scan(&target, &config).await.map_err(|e| {
                    error!(error = %e, "Scan could not start.");
                    e.to_string()
                });
                let _ = tx_clone.send(outcome).await;
            });
        }
        _ => {}
    }
}

/// Handles input while a report is on screen.
fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Char('e') => app.export_report(),
        KeyCode::Char('l') => app.toggle_logs(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Left => app.scroll_logs_left(),
        KeyCode::Right => app.scroll_logs_right(),
        _ => {}
    }
}

/// Prefixes `https://` when the user typed a bare host.
fn with_default_scheme(raw: &str) -> String {
    if raw.is_empty() || raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}
