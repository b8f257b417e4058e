// src/ui/widgets/mod.rs

// Module declarations for every UI widget.
pub mod analysis_view; // Findings list plus the details pane.
pub mod disclaimer_popup; // The legal disclaimer shown at startup.
pub mod footer; // The dynamic key-hint bar.
pub mod input; // The target URL input field.
pub mod log_view; // Tail of the log file.
pub mod summary; // Score, per-category status and counts.
