// src/core/report.rs

//! Plain-text rendering of scan results.

use crate::core::models::ScanResults;
use std::io::{self, Write};

/// Renders the Markdown-like report. Empty categories keep their heading.
/// The returned text has no trailing newline.
pub fn render_markdown(target: &str, results: &ScanResults) -> String {
    let mut out = format!("# Report for `{target}`");

    for (category, findings) in results.sections() {
        out.push_str(&format!("\n\n## {category}\n"));
        for finding in findings {
            out.push_str(&format!("\n * {finding}"));
        }
    }

    out
}

pub fn write_results<W: Write>(writer: &mut W, target: &str, results: &ScanResults) -> io::Result<()> {
    writeln!(writer, "{}", render_markdown(target, results))
}

/// Writes the report to standard output.
pub fn print_results(target: &str, results: &ScanResults) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_results(&mut handle, target, results)?;
    handle.flush()
}
