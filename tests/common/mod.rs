//! Common test utilities

#![allow(dead_code)]

use std::time::Duration;
use vanguard_audit::core::config::{InconclusivePolicy, ScanConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A base URL nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Config with a short timeout so failing probes do not stall the suite.
pub fn test_config() -> ScanConfig {
    ScanConfig {
        timeout: Some(Duration::from_secs(5)),
        user_agent: "VanguardAudit-Test/0.1".to_string(),
        ..ScanConfig::default()
    }
}

pub fn withhold_config() -> ScanConfig {
    ScanConfig {
        inconclusive_policy: InconclusivePolicy::Withhold,
        ..test_config()
    }
}

/// Serves `/` with the given response headers.
pub async fn mount_root(server: &MockServer, headers: &[(&str, &str)]) {
    let mut template = ResponseTemplate::new(200).set_body_string("<html></html>");
    for (name, value) in headers {
        template = template.insert_header(*name, *value);
    }
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Makes `file` (relative to the root) answer 200.
pub async fn expose_file(server: &MockServer, file: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{file}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("ref: refs/heads/main\n"))
        .mount(server)
        .await;
}
