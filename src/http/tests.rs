//! Tests for the HTTP client module

use super::*;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::with_config(HttpClientConfig::builder().base_url(server.uri()).build()).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("airq/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.gios.gov.pl/pjp-api")
        .timeout(Duration::from_secs(60))
        .rate_limit(RateLimiterConfig::new(2, 1))
        .header("Accept", "application/json")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://api.gios.gov.pl/pjp-api".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 1)));
    assert_eq!(
        config.default_headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_build_url() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.gios.gov.pl/pjp-api/")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(
        client.build_url("/rest/station/findAll"),
        "https://api.gios.gov.pl/pjp-api/rest/station/findAll"
    );
    assert_eq!(
        client.build_url("http://other.example.com/x"),
        "http://other.example.com/x"
    );
}

#[tokio::test]
async fn test_http_client_get_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/data/getData/92"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"key\":\"PM10\"}"))
        .mount(&mock_server)
        .await;

    let body = client_for(&mock_server)
        .get_text("/rest/data/getData/92")
        .await
        .unwrap();

    assert_eq!(body, "{\"key\":\"PM10\"}");
}

#[tokio::test]
async fn test_http_client_sends_query_and_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/rest/station/findAll"))
        .and(query_param("page", "3"))
        .and(header("X-Custom", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Custom", "yes")
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let body = client
        .get_text("/v1/rest/station/findAll?page=3&size=500")
        .await
        .unwrap();

    assert_eq!(body, "{}");
}

#[tokio::test]
async fn test_http_client_non_success_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such station"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .get_text("/missing")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("no such station"));
}

#[tokio::test]
async fn test_http_client_does_not_retry_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).get_text("/flaky").await.unwrap_err();

    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_http_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let err = client.get_text("/slow").await.unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, crate::Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_http_client_connection_refused_is_transport() {
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:1")
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let err = client.get_text("/anything").await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_http_client_rate_limit_spaces_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/station/findAll"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(10, 1))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let start = Instant::now();
    for _ in 0..3 {
        client.get_text("/rest/station/findAll").await.unwrap();
    }

    assert!(start.elapsed() >= Duration::from_millis(150));
}
