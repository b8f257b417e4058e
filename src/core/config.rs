// src/core/config.rs

use crate::core::error::{AuditError, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

lazy_static! {
    /// Prefix shared by every environment variable the auditor reads.
    pub static ref ENV_PREFIX: String = env!("CARGO_CRATE_NAME").to_uppercase();
    static ref TIMEOUT_ENV: String = format!("{}_TIMEOUT_SECS", ENV_PREFIX.as_str());
    static ref USER_AGENT_ENV: String = format!("{}_USER_AGENT", ENV_PREFIX.as_str());
    static ref MAX_REDIRECTS_ENV: String = format!("{}_MAX_REDIRECTS", ENV_PREFIX.as_str());
    static ref INCONCLUSIVE_ENV: String = format!("{}_INCONCLUSIVE", ENV_PREFIX.as_str());
}

/// Redirect hops followed per lookup unless overridden.
pub const DEFAULT_MAX_REDIRECTS: usize = 20;

/// User agent sent with every probe unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("VanguardAudit/", env!("CARGO_PKG_VERSION"));

/// What a scan does with a probe whose fetch failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InconclusivePolicy {
    /// Treat the file or header as absent. Missing security headers are
    /// still reported for an unreachable site.
    #[default]
    AssumeAbsent,
    /// Never raise a finding from an inconclusive probe.
    Withhold,
}

impl std::str::FromStr for InconclusivePolicy {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assume-absent" | "absent" => Ok(Self::AssumeAbsent),
            "withhold" => Ok(Self::Withhold),
            _ => Err(()),
        }
    }
}

/// HTTP and evaluation settings for a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Per-request timeout. `None` leaves the client default in place.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Redirect hops followed per lookup. Every hop's headers are kept, but
    /// the first status line always belongs to the probed URL itself.
    pub max_redirects: usize,
    pub inconclusive_policy: InconclusivePolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            inconclusive_policy: InconclusivePolicy::default(),
        }
    }
}

impl ScanConfig {
    /// Builds a config from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(TIMEOUT_ENV.as_str()) {
            let secs: u64 = raw.trim().parse().map_err(|_| invalid(&TIMEOUT_ENV, &raw))?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(ua) = lookup(USER_AGENT_ENV.as_str()) {
            if !ua.trim().is_empty() {
                config.user_agent = ua;
            }
        }
        if let Some(raw) = lookup(MAX_REDIRECTS_ENV.as_str()) {
            config.max_redirects = raw.trim().parse().map_err(|_| invalid(&MAX_REDIRECTS_ENV, &raw))?;
        }
        if let Some(raw) = lookup(INCONCLUSIVE_ENV.as_str()) {
            config.inconclusive_policy = raw.parse().map_err(|_| invalid(&INCONCLUSIVE_ENV, &raw))?;
        }

        debug!(?config, "Scan configuration resolved.");
        Ok(config)
    }
}

fn invalid(var: &str, value: &str) -> AuditError {
    AuditError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    }
}
