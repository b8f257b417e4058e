// src/core/scanner/leakage_scanner.rs

use super::fetcher::HeaderFetcher;
use super::scan_category;
use crate::core::config::InconclusivePolicy;
use crate::core::knowledge_base::Category;
use crate::core::models::{Probe, SectionOutcome};
use tracing::{debug, info};

/// Probes `base_url` + `path` and reports whether it answered `200 OK`.
///
/// Returns the probed URL alongside the outcome so inconclusive probes can be
/// traced back to it.
pub async fn check_sensitive_file(fetcher: &HeaderFetcher, base_url: &str, path: &str) -> (String, Probe) {
    let url = format!("{base_url}{path}");
    let probe = fetcher.url_exists(&url).await;
    debug!(url = %url, ?probe, "Sensitive file probed.");
    (url, probe)
}

/// Runs the information leakage checks: every sensitive file in the catalog,
/// then the headers that reveal the server stack.
pub async fn run_leakage_scan(fetcher: &HeaderFetcher, base_url: &str, policy: InconclusivePolicy) -> SectionOutcome {
    info!(base_url, "Starting information leakage scan.");
    let outcome = scan_category(fetcher, base_url, Category::InformationLeakage, policy).await;
    info!(
        findings = outcome.findings.len(),
        inconclusive = outcome.inconclusive.len(),
        "Information leakage scan finished."
    );
    outcome
}
