//! Vanguard Audit - a small website security auditor.
//!
//! Probes a site for commonly exposed sensitive files and for the presence of
//! a handful of security-related response headers, then reports the findings
//! grouped by category.

pub mod core;
pub mod logging;

pub use crate::core::config::{InconclusivePolicy, ScanConfig};
pub use crate::core::error::{AuditError, Result};
pub use crate::core::knowledge_base::Category;
pub use crate::core::models::{Finding, Probe, ScanReport, ScanResults};
pub use crate::core::scanner::{Scanner, run_full_scan};
