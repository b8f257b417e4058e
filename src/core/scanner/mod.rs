// src/core/scanner/mod.rs

// This file acts as the public interface for the `scanner` module.
pub mod fetcher;
pub mod headers_scanner;
pub mod leakage_scanner;

use crate::core::config::{InconclusivePolicy, ScanConfig};
use crate::core::error::{AuditError, Result};
use crate::core::knowledge_base::{self, Category, CheckDescriptor, CheckKind};
use crate::core::models::{Finding, InconclusiveCheck, Probe, ScanReport, ScanResults, SectionOutcome};
use crate::core::report;
use self::fetcher::HeaderFetcher;
use self::headers_scanner::run_headers_scan;
use self::leakage_scanner::run_leakage_scan;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Audits one website: runs every category check against a fixed base URL
/// and keeps the findings between runs.
pub struct Scanner {
    base_url: String,
    fetcher: Arc<HeaderFetcher>,
    policy: InconclusivePolicy,
    results: ScanResults,
}

impl Scanner {
    /// Creates a scanner with the default configuration.
    pub fn new(url: &str) -> Result<Self> {
        Self::with_config(url, &ScanConfig::default())
    }

    /// Creates a scanner with its own fetcher built from `config`.
    pub fn with_config(url: &str, config: &ScanConfig) -> Result<Self> {
        let fetcher = Arc::new(HeaderFetcher::new(config)?);
        Self::with_fetcher(url, fetcher, config.inconclusive_policy)
    }

    /// Creates a scanner that shares an existing fetcher and its cache.
    pub fn with_fetcher(url: &str, fetcher: Arc<HeaderFetcher>, policy: InconclusivePolicy) -> Result<Self> {
        let base_url = normalize_url(url)?;
        debug!(base_url = %base_url, ?policy, "Scanner created.");
        Ok(Self {
            base_url,
            fetcher,
            policy,
            results: ScanResults::new(),
        })
    }

    /// The normalized base URL, always ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The fetcher this scanner probes through.
    pub fn fetcher(&self) -> &HeaderFetcher {
        &self.fetcher
    }

    /// Runs both checks and records their sections in report order.
    pub async fn run(&mut self) {
        info!(base_url = %self.base_url, "Starting audit.");

        let (leakage, headers) = tokio::join!(
            run_leakage_scan(&self.fetcher, &self.base_url, self.policy),
            run_headers_scan(&self.fetcher, &self.base_url, self.policy)
        );

        self.results.record(Category::InformationLeakage, leakage);
        self.results.record(Category::SecurityHeaders, headers);

        info!(
            findings = self.results.all_findings().count(),
            inconclusive = self.results.inconclusive().count(),
            requests = self.fetcher.network_requests(),
            "Audit finished."
        );
    }

    pub fn results(&self) -> &ScanResults {
        &self.results
    }

    /// Writes the Markdown report to standard output.
    pub fn print_results(&self) -> std::io::Result<()> {
        report::print_results(&self.base_url, &self.results)
    }

    /// Packages the current results into a timestamped report.
    pub fn report(&self) -> ScanReport {
        ScanReport {
            target: self.base_url.clone(),
            scanned_at: Utc::now(),
            results: self.results.clone(),
        }
    }
}

/// Validates `url` and appends a trailing `/` if it is missing.
pub fn normalize_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|source| AuditError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AuditError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AuditError::MissingHost(url.to_string()));
    }

    let mut normalized = url.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}

/// Probes a single catalog row against the base URL.
pub(crate) async fn probe_check(fetcher: &HeaderFetcher, base_url: &str, check: &CheckDescriptor) -> (String, Probe) {
    match check.kind {
        CheckKind::ExposedFile(path) => leakage_scanner::check_sensitive_file(fetcher, base_url, path).await,
        CheckKind::LeakyHeader(name) | CheckKind::MissingHeader(name) => {
            (base_url.to_string(), headers_scanner::check_header(fetcher, base_url, name).await)
        }
    }
}

/// Turns a probe into a finding according to the check kind and policy.
/// Inconclusive probes are always recorded as such.
pub(crate) fn evaluate(
    check: &CheckDescriptor,
    url: &str,
    probe: Probe,
    policy: InconclusivePolicy,
    outcome: &mut SectionOutcome,
) {
    let fires = match (&probe, check.kind) {
        (Probe::Present, CheckKind::ExposedFile(_) | CheckKind::LeakyHeader(_)) => true,
        (Probe::Absent, CheckKind::MissingHeader(_)) => true,
        (Probe::Inconclusive(_), CheckKind::MissingHeader(_)) => policy == InconclusivePolicy::AssumeAbsent,
        _ => false,
    };

    if let Probe::Inconclusive(reason) = probe {
        debug!(code = check.code, url, reason = %reason, "Probe inconclusive.");
        outcome.inconclusive.push(InconclusiveCheck {
            code: check.code.to_string(),
            url: url.to_string(),
            reason,
        });
    }

    if fires {
        debug!(code = check.code, "Check fired, adding finding.");
        outcome
            .findings
            .push(Finding::new(check.code, check.severity, check.render_message()));
    }
}

/// Walks the catalog rows of one category in order.
pub(crate) async fn scan_category(
    fetcher: &HeaderFetcher,
    base_url: &str,
    category: Category,
    policy: InconclusivePolicy,
) -> SectionOutcome {
    let mut outcome = SectionOutcome::default();
    for check in knowledge_base::checks_for(category) {
        let (url, probe) = probe_check(fetcher, base_url, check).await;
        evaluate(check, &url, probe, policy, &mut outcome);
    }
    outcome
}

/// Builds a scanner for `target`, runs it and returns the stamped report.
pub async fn run_full_scan(target: &str, config: &ScanConfig) -> Result<ScanReport> {
    let mut scanner = Scanner::with_config(target, config)?;
    scanner.run().await;
    Ok(scanner.report())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_appended_once() {
        assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com/");
        assert_eq!(normalize_url("http://example.com/").unwrap(), "http://example.com/");
        assert_eq!(normalize_url("https://example.com/blog").unwrap(), "https://example.com/blog/");
    }

    #[test]
    fn invalid_urls_fail_fast() {
        assert!(matches!(normalize_url("example.com"), Err(AuditError::InvalidUrl { .. })));
        assert!(matches!(normalize_url("ftp://example.com"), Err(AuditError::UnsupportedScheme(_))));
        assert!(normalize_url("").is_err());
    }

    #[test]
    fn scanner_rejects_bad_input() {
        assert!(Scanner::new("not a url").is_err());
    }

    fn check(code: &str) -> &'static CheckDescriptor {
        knowledge_base::get_check(code).unwrap()
    }

    #[test]
    fn exposed_file_fires_only_when_present() {
        let git = check("LEAK_GIT_HEAD");
        let mut outcome = SectionOutcome::default();
        evaluate(git, "u", Probe::Absent, InconclusivePolicy::AssumeAbsent, &mut outcome);
        assert!(outcome.findings.is_empty());
        evaluate(git, "u", Probe::Present, InconclusivePolicy::AssumeAbsent, &mut outcome);
        assert_eq!(outcome.findings[0].message, "The sensitive file `.git/HEAD` should be removed");
    }

    #[test]
    fn missing_header_follows_policy_when_inconclusive() {
        let xfo = check("HEADERS_X_FRAME_OPTIONS_MISSING");
        let refused = || Probe::Inconclusive("refused".into());

        let mut assume = SectionOutcome::default();
        evaluate(xfo, "u", refused(), InconclusivePolicy::AssumeAbsent, &mut assume);
        assert_eq!(assume.findings.len(), 1);
        assert_eq!(assume.inconclusive.len(), 1);

        let mut withhold = SectionOutcome::default();
        evaluate(xfo, "u", refused(), InconclusivePolicy::Withhold, &mut withhold);
        assert!(withhold.findings.is_empty());
        assert_eq!(withhold.inconclusive[0].code, "HEADERS_X_FRAME_OPTIONS_MISSING");
    }

    #[test]
    fn present_security_header_is_not_reported() {
        let hsts = check("HEADERS_HSTS_MISSING");
        let mut outcome = SectionOutcome::default();
        evaluate(hsts, "u", Probe::Present, InconclusivePolicy::AssumeAbsent, &mut outcome);
        assert_eq!(outcome, SectionOutcome::default());
    }

    #[test]
    fn inconclusive_leak_never_fires() {
        let powered = check("LEAK_X_POWERED_BY");
        let mut outcome = SectionOutcome::default();
        evaluate(powered, "u", Probe::Inconclusive("dns".into()), InconclusivePolicy::AssumeAbsent, &mut outcome);
        assert!(outcome.findings.is_empty());
        assert_eq!(outcome.inconclusive.len(), 1);
    }
}
