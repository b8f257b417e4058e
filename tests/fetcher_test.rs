//! Integration tests for the caching header fetcher

mod common;

use common::{UNREACHABLE, test_config};
use vanguard_audit::core::models::Probe;
use vanguard_audit::core::scanner::fetcher::HeaderFetcher;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_same_url_is_fetched_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-Frame-Options", "DENY"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HeaderFetcher::new(&test_config()).expect("Failed to create fetcher");
    let url = format!("{}/", mock_server.uri());

    let first = fetcher.get_headers(&url).await;
    let second = fetcher.get_headers(&url).await;

    assert_eq!(first, second);
    assert_eq!(fetcher.network_requests(), 1);
    assert_eq!(fetcher.cached_urls().await, 1);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_concurrent_lookups_share_one_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HeaderFetcher::new(&test_config()).expect("Failed to create fetcher");
    let url = format!("{}/", mock_server.uri());

    let (a, b, c) = tokio::join!(
        fetcher.get_headers(&url),
        fetcher.header_exists(&url, "X-Frame-Options"),
        fetcher.url_exists(&url)
    );

    assert!(a.is_ok());
    assert_eq!(b, Probe::Absent);
    assert_eq!(c, Probe::Present);
    assert_eq!(fetcher.network_requests(), 1);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_status_line_comes_first() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-Powered-By", "PHP/7.4"))
        .mount(&mock_server)
        .await;

    let fetcher = HeaderFetcher::new(&test_config()).expect("Failed to create fetcher");
    let lines = fetcher
        .get_headers(&format!("{}/", mock_server.uri()))
        .await
        .expect("Fetch failed");

    assert_eq!(lines[0], "HTTP/1.1 200 OK");
    assert!(lines.iter().any(|l| l == "x-powered-by: PHP/7.4"));
}

#[tokio::test]
async fn test_header_search_ignores_case() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("strict-transport-security", "max-age=31536000"))
        .mount(&mock_server)
        .await;

    let fetcher = HeaderFetcher::new(&test_config()).expect("Failed to create fetcher");
    let url = format!("{}/", mock_server.uri());

    assert_eq!(fetcher.header_exists(&url, "Strict-Transport-Security").await, Probe::Present);
    assert_eq!(fetcher.header_exists(&url, "X-Content-Type-Options").await, Probe::Absent);
}

#[tokio::test]
async fn test_missing_file_is_absent() {
    // No mocks mounted: every path answers 404.
    let mock_server = MockServer::start().await;
    let fetcher = HeaderFetcher::new(&test_config()).expect("Failed to create fetcher");

    let probe = fetcher.url_exists(&format!("{}/.git/HEAD", mock_server.uri())).await;
    assert_eq!(probe, Probe::Absent);
}

#[tokio::test]
async fn test_redirected_file_keeps_its_own_status_line() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.git/HEAD"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let fetcher = HeaderFetcher::new(&test_config()).expect("Failed to create fetcher");
    let url = format!("{}/.git/HEAD", mock_server.uri());
    let lines = fetcher.get_headers(&url).await.expect("Fetch failed");

    assert_eq!(lines[0], "HTTP/1.1 302 Found");
    assert!(lines.iter().skip(1).any(|l| l == "HTTP/1.1 200 OK"));
    assert_eq!(fetcher.url_exists(&url).await, Probe::Absent);
    assert_eq!(fetcher.network_requests(), 2);
}

#[tokio::test]
async fn test_headers_of_every_hop_are_searched() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", "/home")
                .insert_header("X-Powered-By", "PHP/7.4"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-Frame-Options", "DENY"))
        .mount(&mock_server)
        .await;

    let fetcher = HeaderFetcher::new(&test_config()).expect("Failed to create fetcher");
    let url = format!("{}/", mock_server.uri());

    assert_eq!(fetcher.header_exists(&url, "X-Powered-By").await, Probe::Present);
    assert_eq!(fetcher.header_exists(&url, "X-Frame-Options").await, Probe::Present);
    assert_eq!(fetcher.header_exists(&url, "Strict-Transport-Security").await, Probe::Absent);
}

#[tokio::test]
async fn test_redirect_limit_stops_the_chain() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/home"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client");
    let fetcher = HeaderFetcher::with_client(client, 0);
    let lines = fetcher
        .get_headers(&format!("{}/", mock_server.uri()))
        .await
        .expect("Fetch failed");

    assert_eq!(lines[0], "HTTP/1.1 301 Moved Permanently");
    assert_eq!(fetcher.network_requests(), 1);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_failures_are_cached() {
    let fetcher = HeaderFetcher::new(&test_config()).expect("Failed to create fetcher");
    let url = format!("{UNREACHABLE}/");

    assert!(fetcher.get_headers(&url).await.is_err());
    assert!(matches!(fetcher.url_exists(&url).await, Probe::Inconclusive(_)));
    assert!(matches!(
        fetcher.header_exists(&url, "X-Frame-Options").await,
        Probe::Inconclusive(_)
    ));
    assert_eq!(fetcher.network_requests(), 1);
}
