// src/core/scanner/fetcher.rs

use crate::core::config::ScanConfig;
use crate::core::error::Result;
use crate::core::models::{HeaderLookup, Probe};
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{Client, StatusCode, Version};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};
use url::Url;

/// Fetches response headers and memoizes the outcome per URL.
///
/// A lookup is made at most once per URL for the lifetime of the fetcher,
/// failures included. Concurrent lookups of the same URL share one request.
///
/// Redirects are followed by hand. The lookup keeps the header block of every
/// hop in order, so the first line is always the status line of the URL that
/// was asked for.
pub struct HeaderFetcher {
    client: Client,
    max_redirects: usize,
    cache: Mutex<HashMap<String, Arc<OnceCell<HeaderLookup>>>>,
    network_requests: AtomicU64,
}

impl HeaderFetcher {
    /// Builds a fetcher with an HTTP client configured from `config`.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_client(builder.build()?, config.max_redirects))
    }

    /// Wraps an existing client. It must not follow redirects itself, or the
    /// intermediate header blocks are lost.
    pub fn with_client(client: Client, max_redirects: usize) -> Self {
        Self {
            client,
            max_redirects,
            cache: Mutex::new(HashMap::new()),
            network_requests: AtomicU64::new(0),
        }
    }

    /// Returns the header lines for `url`, fetching them on first use.
    pub async fn get_headers(&self, url: &str) -> HeaderLookup {
        let cell = {
            let mut cache = self.cache.lock().await;
            Arc::clone(cache.entry(url.to_string()).or_default())
        };

        cell.get_or_init(|| self.fetch(url)).await.clone()
    }

    /// Whether any header line mentions `name`, ignoring case.
    pub async fn header_exists(&self, url: &str, name: &str) -> Probe {
        header_probe(&self.get_headers(url).await, name)
    }

    /// Whether `url` answered with `200 OK`.
    pub async fn url_exists(&self, url: &str) -> Probe {
        status_probe(&self.get_headers(url).await)
    }

    /// Number of HTTP requests actually sent, redirect hops included.
    pub fn network_requests(&self) -> u64 {
        self.network_requests.load(Ordering::Relaxed)
    }

    /// Number of URLs with a cache entry.
    pub async fn cached_urls(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn fetch(&self, url: &str) -> HeaderLookup {
        let mut lines = Vec::new();
        let mut current = url.to_string();

        for hop in 0..=self.max_redirects {
            self.network_requests.fetch_add(1, Ordering::Relaxed);
            debug!(url = %current, hop, "Fetching headers.");

            let response = match self.client.get(&current).send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!(url, hop, error = %e, "Header fetch failed, caching the failure.");
                    return Err(e.to_string());
                }
            };
            debug!(url = %current, status = %response.status(), "Received response.");
            lines.extend(header_lines(response.version(), response.status(), response.headers()));

            match redirect_target(&current, response.status(), response.headers()) {
                Some(next) if hop < self.max_redirects => current = next,
                Some(_) => warn!(url, limit = self.max_redirects, "Redirect limit reached."),
                None => break,
            }
        }

        Ok(lines)
    }
}

/// Where a response redirects to, resolved against `current`.
///
/// Only 300-303, 307 and 308 with a usable `Location` count. A 304 is not a
/// redirect.
pub fn redirect_target(current: &str, status: StatusCode, headers: &HeaderMap) -> Option<String> {
    if !matches!(status.as_u16(), 300..=303 | 307 | 308) {
        return None;
    }
    let location = headers.get(LOCATION)?.to_str().ok()?;
    let next = Url::parse(current).ok()?.join(location).ok()?;
    Some(next.into())
}

/// Flattens a response head into lines: the status line first, then one
/// `name: value` line per header. Non-UTF-8 values are decoded lossily.
pub fn header_lines(version: Version, status: StatusCode, headers: &HeaderMap) -> Vec<String> {
    let mut lines = Vec::with_capacity(headers.len() + 1);
    lines.push(format!("{version:?} {status}"));
    for (name, value) in headers {
        lines.push(format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes())));
    }
    lines
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive substring search for `name` across every line.
pub fn header_probe(lookup: &HeaderLookup, name: &str) -> Probe {
    match lookup {
        Ok(lines) if lines.iter().any(|line| contains_ignore_case(line, name)) => Probe::Present,
        Ok(_) => Probe::Absent,
        Err(reason) => Probe::Inconclusive(reason.clone()),
    }
}

/// Looks for `200 OK` in the status line. No lines at all counts as absent.
pub fn status_probe(lookup: &HeaderLookup) -> Probe {
    match lookup {
        Ok(lines) => match lines.first() {
            Some(status) if contains_ignore_case(status, "200 OK") => Probe::Present,
            _ => Probe::Absent,
        },
        Err(reason) => Probe::Inconclusive(reason.clone()),
    }
}
