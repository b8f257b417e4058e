//! This module holds the static catalog of every check the auditor runs.
//! Each entry says what to probe, which category a hit belongs to, and how to
//! phrase it. Adding a check means adding a row here; the scanners only walk
//! the table.

use crate::core::models::Severity;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter};

/// The report sections. Declaration order is report order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Category {
    #[strum(to_string = "Information Leakage")]
    #[serde(rename = "Information Leakage")]
    InformationLeakage,
    #[strum(to_string = "Security-enhancing HTTP headers")]
    #[serde(rename = "Security-enhancing HTTP headers")]
    SecurityHeaders,
}

/// What a check probes and when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// A path appended to the base URL; fires when it answers `200 OK`.
    ExposedFile(&'static str),
    /// A response header on the base URL that should not be sent.
    LeakyHeader(&'static str),
    /// A response header on the base URL that should be sent.
    MissingHeader(&'static str),
}

/// One row of the catalog.
#[derive(Debug)]
pub struct CheckDescriptor {
    /// A unique, machine-readable identifier (e.g. "LEAK_GIT_HEAD").
    pub code: &'static str,
    pub category: Category,
    pub severity: Severity,
    pub kind: CheckKind,
    /// Finding text; `{target}` is replaced by the path or header name.
    pub message: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub remediation: &'static str,
}

impl CheckDescriptor {
    /// The path or header name this check is about.
    pub fn target(&self) -> &'static str {
        match self.kind {
            CheckKind::ExposedFile(t) | CheckKind::LeakyHeader(t) | CheckKind::MissingHeader(t) => t,
        }
    }

    pub fn render_message(&self) -> String {
        self.message.replace("{target}", self.target())
    }
}

const EXPOSED_FILE_MESSAGE: &str = "The sensitive file `{target}` should be removed";
const LEAKY_HEADER_MESSAGE: &str = "The HTTP header `{target}` should be removed";
const MISSING_HEADER_MESSAGE: &str = "You should set the `{target}` HTTP header";

const VCS_DESCRIPTION: &str = "Version control metadata is publicly reachable. From it an attacker can often rebuild the full source tree, including history, credentials committed by mistake, and internal paths.";
const VCS_REMEDIATION: &str = "Delete the metadata directory from the web root, deploy from an export instead of a working copy, and deny access to dot-directories in the web server configuration.";
const BACKUP_DESCRIPTION: &str = "An editor or backup copy of a configuration script is served as plain text instead of being executed. These files usually contain database credentials and secret keys.";
const BACKUP_REMEDIATION: &str = "Remove the backup copy from the server, rotate every secret it contains, and block requests for '~', '.bak' and '.save' suffixes.";

const fn exposed_file(code: &'static str, path: &'static str, title: &'static str, vcs: bool) -> CheckDescriptor {
    CheckDescriptor {
        code,
        category: Category::InformationLeakage,
        severity: Severity::Critical,
        kind: CheckKind::ExposedFile(path),
        message: EXPOSED_FILE_MESSAGE,
        title,
        description: if vcs { VCS_DESCRIPTION } else { BACKUP_DESCRIPTION },
        remediation: if vcs { VCS_REMEDIATION } else { BACKUP_REMEDIATION },
    }
}

/// The catalog, in evaluation order.
pub static CHECKS: &[CheckDescriptor] = &[
    // --- Information Leakage: exposed files ---
    exposed_file("LEAK_GIT_HEAD", ".git/HEAD", "Git Repository Exposed", true),
    exposed_file("LEAK_SVN_ENTRIES", ".svn/entries", "Subversion Metadata Exposed", true),
    exposed_file("LEAK_HG_DIRSTATE", ".hg/dirstate", "Mercurial Repository Exposed", true),
    exposed_file("LEAK_WP_CONFIG_TILDE", "wp-config.php~", "WordPress Config Backup Exposed", false),
    exposed_file("LEAK_WP_CONFIG_BAK", "wp-config.php.bak", "WordPress Config Backup Exposed", false),
    exposed_file("LEAK_WP_CONFIG_SAVE", "wp-config.php.save", "WordPress Config Backup Exposed", false),
    exposed_file("LEAK_CONFIG_TILDE", "config.php~", "Config Backup Exposed", false),
    exposed_file("LEAK_CONFIG_BAK", "config.php.bak", "Config Backup Exposed", false),
    exposed_file("LEAK_CONFIG_SAVE", "config.php.save", "Config Backup Exposed", false),
    exposed_file("LEAK_CONFIGURATION_TILDE", "configuration.php~", "Joomla Config Backup Exposed", false),
    exposed_file("LEAK_CONFIGURATION_BAK", "configuration.php.bak", "Joomla Config Backup Exposed", false),
    exposed_file("LEAK_CONFIGURATION_SAVE", "configuration.php.save", "Joomla Config Backup Exposed", false),
    exposed_file("LEAK_SETTINGS_TILDE", "settings.php~", "Settings Backup Exposed", false),
    exposed_file("LEAK_SETTINGS_BAK", "settings.php.bak", "Settings Backup Exposed", false),
    exposed_file("LEAK_SETTINGS_SAVE", "settings.php.save", "Settings Backup Exposed", false),
    // --- Information Leakage: headers ---
    CheckDescriptor {
        code: "LEAK_X_POWERED_BY",
        category: Category::InformationLeakage,
        severity: Severity::Info,
        kind: CheckKind::LeakyHeader("X-Powered-By"),
        message: LEAKY_HEADER_MESSAGE,
        title: "X-Powered-By Header Present",
        description: "The server announces the language or framework it runs on, often with an exact version. This makes it trivial to match the site against known vulnerabilities.",
        remediation: "Disable the header (e.g. 'expose_php = Off' in php.ini, or remove it at the reverse proxy).",
    },
    // --- Security-enhancing HTTP headers ---
    CheckDescriptor {
        code: "HEADERS_X_FRAME_OPTIONS_MISSING",
        category: Category::SecurityHeaders,
        severity: Severity::Warning,
        kind: CheckKind::MissingHeader("X-Frame-Options"),
        message: MISSING_HEADER_MESSAGE,
        title: "X-Frame-Options Missing",
        description: "This header protects your visitors against 'clickjacking' attacks, where an attacker loads your site in an invisible iframe to trick users into clicking on malicious content.",
        remediation: "Add the 'X-Frame-Options' header and set it to 'DENY' (no framing allowed) or 'SAMEORIGIN' (only you can frame your site).",
    },
    CheckDescriptor {
        code: "HEADERS_X_CONTENT_TYPE_OPTIONS_MISSING",
        category: Category::SecurityHeaders,
        severity: Severity::Warning,
        kind: CheckKind::MissingHeader("X-Content-Type-Options"),
        message: MISSING_HEADER_MESSAGE,
        title: "X-Content-Type-Options Missing",
        description: "This header prevents browsers from guessing the content type of a file (MIME sniffing), which mitigates attacks where an upload disguised as an image is executed as a script.",
        remediation: "Add the 'X-Content-Type-Options' header and set its value to 'nosniff'.",
    },
    CheckDescriptor {
        code: "HEADERS_HSTS_MISSING",
        category: Category::SecurityHeaders,
        severity: Severity::Warning,
        kind: CheckKind::MissingHeader("Strict-Transport-Security"),
        message: MISSING_HEADER_MESSAGE,
        title: "HSTS Header Missing",
        description: "Strict-Transport-Security instructs browsers to only talk to your site over HTTPS. It protects against protocol downgrade attacks and cookie hijacking.",
        remediation: "Send 'Strict-Transport-Security: max-age=31536000; includeSubDomains' on every HTTPS response.",
    },
];

static CHECKS_BY_CODE: Lazy<HashMap<&'static str, &'static CheckDescriptor>> =
    Lazy::new(|| CHECKS.iter().map(|c| (c.code, c)).collect());

/// Catalog rows belonging to a category, in evaluation order.
pub fn checks_for(category: Category) -> impl Iterator<Item = &'static CheckDescriptor> {
    CHECKS.iter().filter(move |c| c.category == category)
}

/// Looks up a catalog row by its code.
pub fn get_check(code: &str) -> Option<&'static CheckDescriptor> {
    CHECKS_BY_CODE.get(code).copied()
}
