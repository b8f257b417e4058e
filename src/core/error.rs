// src/core/error.rs

//! Error types for the auditor library.
//!
//! A failed fetch is not an error: it is cached and surfaces as an
//! inconclusive probe.

use thiserror::Error;

/// Errors raised while setting up a scan.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("invalid target URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme `{0}` (expected http or https)")]
    UnsupportedScheme(String),

    #[error("target URL `{0}` has no host")]
    MissingHost(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("invalid value `{value}` for environment variable {var}")]
    InvalidEnv { var: String, value: String },
}

/// Result type alias for auditor operations.
pub type Result<T> = std::result::Result<T, AuditError>;
