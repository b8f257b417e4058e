// src/core/scanner/headers_scanner.rs

use super::fetcher::HeaderFetcher;
use super::scan_category;
use crate::core::config::InconclusivePolicy;
use crate::core::knowledge_base::Category;
use crate::core::models::{Probe, SectionOutcome};
use tracing::{debug, info};

/// Checks whether a specific HTTP header is sent on `url`.
///
/// # Arguments
/// * `fetcher` - The shared, caching header fetcher.
/// * `url` - The page whose response headers are inspected.
/// * `name` - The header to look for (e.g. "X-Frame-Options"). Matching is a
///   case-insensitive substring search over every header line.
///
/// # Returns
/// `Probe::Present` or `Probe::Absent`, or `Probe::Inconclusive` when the
/// headers could not be fetched.
pub async fn check_header(fetcher: &HeaderFetcher, url: &str, name: &str) -> Probe {
    debug!(header_name = name, "Checking for header.");
    let probe = fetcher.header_exists(url, name).await;
    match &probe {
        Probe::Present => debug!(header_name = name, "Header found."),
        Probe::Absent => debug!(header_name = name, "Header not found."),
        Probe::Inconclusive(reason) => debug!(header_name = name, %reason, "Header lookup failed."),
    }
    probe
}

/// Runs the security-enhancing header checks against the base URL.
///
/// Every header in the catalog that is not sent yields a finding, in catalog
/// order.
pub async fn run_headers_scan(fetcher: &HeaderFetcher, base_url: &str, policy: InconclusivePolicy) -> SectionOutcome {
    info!(base_url, "Starting headers scan.");
    let outcome = scan_category(fetcher, base_url, Category::SecurityHeaders, policy).await;
    info!(findings = %outcome.findings.len(), "Headers scan finished.");
    outcome
}
