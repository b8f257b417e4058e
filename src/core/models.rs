// src/core/models.rs

use crate::core::knowledge_base::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// --- Reusable Result Types ---

/// Cached outcome of one header fetch: the status line followed by
/// `name: value` lines, repeated for each redirect hop, or the reason the
/// request failed.
pub type HeaderLookup = Result<Vec<String>, String>;

/// Tri-state outcome of probing a single file or header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Probe {
    Present,
    Absent,
    /// The fetch failed, so presence could not be decided.
    Inconclusive(String),
}

// --- Core Data Models ---

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// A single piece of advice produced by a check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub code: String,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn new(code: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self { code: code.to_string(), severity, message: message.into() }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A probe that could not be decided because its fetch failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InconclusiveCheck {
    pub code: String,
    pub url: String,
    pub reason: String,
}

/// Everything a single category check produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionOutcome {
    pub findings: Vec<Finding>,
    pub inconclusive: Vec<InconclusiveCheck>,
}

// --- Scan Results ---

/// Findings grouped by category.
///
/// Sections iterate in category order, which is also the order a run
/// records them in. Recording a section again replaces it, so every
/// category appears exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResults {
    sections: BTreeMap<Category, Vec<Finding>>,
    inconclusive: BTreeMap<Category, Vec<InconclusiveCheck>>,
}

impl ScanResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the outcome of one category check, replacing any previous one.
    pub fn record(&mut self, category: Category, outcome: SectionOutcome) {
        self.sections.insert(category, outcome.findings);
        self.inconclusive.insert(category, outcome.inconclusive);
    }

    /// Findings of a category, or an empty slice if it was never recorded.
    pub fn findings(&self, category: Category) -> &[Finding] {
        self.sections.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The finding strings of a category, in order.
    pub fn messages(&self, category: Category) -> Vec<&str> {
        self.findings(category).iter().map(|f| f.message.as_str()).collect()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.sections.contains_key(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.sections.keys().copied()
    }

    pub fn sections(&self) -> impl Iterator<Item = (Category, &[Finding])> + '_ {
        self.sections.iter().map(|(c, f)| (*c, f.as_slice()))
    }

    /// Every finding across all categories, in report order.
    pub fn all_findings(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.sections.values().flatten()
    }

    /// Probes that could not be decided, across all categories.
    pub fn inconclusive(&self) -> impl Iterator<Item = &InconclusiveCheck> + '_ {
        self.inconclusive.values().flatten()
    }

    /// Undecided probes of a single category.
    pub fn inconclusive_in(&self, category: Category) -> &[InconclusiveCheck] {
        self.inconclusive.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.all_findings().filter(|f| f.severity == severity).count()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.values().all(Vec::is_empty)
    }
}

// --- Main Report ---

/// A finished scan, ready to be rendered or exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// The normalized base URL that was scanned.
    pub target: String,
    pub scanned_at: DateTime<Utc>,
    pub results: ScanResults,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(msg: &str, severity: Severity) -> Finding {
        Finding::new("TEST", severity, msg)
    }

    #[test]
    fn recording_twice_replaces_the_section() {
        let mut results = ScanResults::new();
        let outcome = SectionOutcome {
            findings: vec![finding("a", Severity::Warning)],
            inconclusive: Vec::new(),
        };
        results.record(Category::SecurityHeaders, outcome.clone());
        results.record(Category::SecurityHeaders, outcome);

        assert_eq!(results.messages(Category::SecurityHeaders), vec!["a"]);
        assert_eq!(results.categories().count(), 1);
    }

    #[test]
    fn sections_follow_category_order() {
        let mut results = ScanResults::new();
        results.record(Category::SecurityHeaders, SectionOutcome::default());
        results.record(Category::InformationLeakage, SectionOutcome::default());

        let order: Vec<Category> = results.categories().collect();
        assert_eq!(order, vec![Category::InformationLeakage, Category::SecurityHeaders]);
        assert!(results.is_empty());
    }

    #[test]
    fn unrecorded_category_has_no_findings() {
        let results = ScanResults::new();
        assert!(results.findings(Category::InformationLeakage).is_empty());
        assert!(!results.contains(Category::InformationLeakage));
    }

    #[test]
    fn severity_counts_span_all_sections() {
        let mut results = ScanResults::new();
        results.record(
            Category::InformationLeakage,
            SectionOutcome {
                findings: vec![finding("x", Severity::Critical), finding("y", Severity::Info)],
                inconclusive: Vec::new(),
            },
        );
        results.record(
            Category::SecurityHeaders,
            SectionOutcome {
                findings: vec![finding("z", Severity::Warning)],
                inconclusive: vec![InconclusiveCheck {
                    code: "HEADERS_X_FRAME_OPTIONS_MISSING".into(),
                    url: "http://example.com/".into(),
                    reason: "connection refused".into(),
                }],
            },
        );

        assert_eq!(results.count_by_severity(Severity::Critical), 1);
        assert_eq!(results.count_by_severity(Severity::Warning), 1);
        assert_eq!(results.inconclusive().count(), 1);
        assert!(results.inconclusive_in(Category::InformationLeakage).is_empty());
        assert_eq!(results.inconclusive_in(Category::SecurityHeaders).len(), 1);
        assert_eq!(results.all_findings().count(), 3);
    }

    #[test]
    fn results_serialize_with_category_names() {
        let mut results = ScanResults::new();
        results.record(Category::InformationLeakage, SectionOutcome::default());
        let json = serde_json::to_value(&results).unwrap();
        assert!(json["sections"].get("Information Leakage").is_some());
    }
}
