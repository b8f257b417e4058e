// src/core/mod.rs

// The `mod.rs` file acts as the root of the `core` module, exposing its
// sub-modules to the crate and to the binary.

/// Scan settings and their environment overrides.
pub mod config;

/// Errors raised while setting up a scan.
pub mod error;

/// The static catalog of checks: what to probe, how to phrase a hit, and
/// how to fix it.
pub mod knowledge_base;

/// Data structures shared across the crate, such as `ScanResults`,
/// `Finding` and `Probe`.
pub mod models;

/// Text rendering of scan results.
pub mod report;

/// The header fetcher, the category checks and the `Scanner` orchestrator.
pub mod scanner;
