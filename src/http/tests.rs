//! Tests for the HTTP client module

use super::client::encode_query;
use super::*;
use crate::error::Error;
use crate::types::{Method, Params};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn params(value: serde_json::Value) -> Params {
    value.as_object().cloned().unwrap()
}

async fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
    assert!(!config.credentials.is_some());
    assert!(config.user_agent.starts_with("dms-client/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .rate_limit(RateLimiterConfig::new(5, 5))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .credentials(Credentials::bearer("tok"))
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(5, 5)));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert!(config.credentials.is_some());
}

#[test]
fn test_encode_query() {
    let encoded = encode_query(&params(json!({
        "space": "sp",
        "limit": 10,
        "includeTyping": true,
        "skipped": null
    })));

    assert!(encoded.contains(&("space".to_string(), "sp".to_string())));
    assert!(encoded.contains(&("limit".to_string(), "10".to_string())));
    assert!(encoded.contains(&("includeTyping".to_string(), "true".to_string())));
    assert_eq!(encoded.len(), 3);
}

#[test]
fn test_build_url() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com/api/v1/projects/demo/")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(
        client.build_url("/models/spaces"),
        "https://api.example.com/api/v1/projects/demo/models/spaces"
    );
    assert_eq!(
        client.build_url("http://other.example.com/x"),
        "http://other.example.com/x"
    );
}

#[test]
fn test_credentials_debug_hides_secret() {
    let debug = format!("{:?}", Credentials::bearer("super-secret"));
    assert!(!debug.contains("super-secret"));

    let debug = format!(
        "{:?}",
        Credentials::ApiKey {
            header: "api-key".to_string(),
            value: "hidden".to_string()
        }
    );
    assert!(debug.contains("api-key"));
    assert!(!debug.contains("hidden"));
}

#[tokio::test]
async fn test_get_sends_query_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models/spaces"))
        .and(query_param("includeGlobal", "true"))
        .and(query_param("cursor", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let body = client
        .send_json(
            Method::GET,
            "/models/spaces",
            &params(json!({"includeGlobal": true, "cursor": "abc"})),
        )
        .await
        .unwrap();

    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/instances/list"))
        .and(body_json(json!({"instanceType": "node", "limit": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": 1}]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let body = client
        .send_json(
            Method::POST,
            "/models/instances/list",
            &params(json!({"instanceType": "node", "limit": 5})),
        )
        .await
        .unwrap();

    assert_eq!(body["items"][0]["id"], 1);
}

#[tokio::test]
async fn test_credentials_and_default_headers_applied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("Authorization", "Bearer token-123"))
        .and(header("X-Trace", "on"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Trace", "on")
        .credentials(Credentials::bearer("token-123"))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    client
        .send_json(Method::GET, "/secure", &Params::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_client_error_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/instances"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "Invalid property"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .send_json(Method::POST, "/models/instances", &Params::new())
        .await
        .unwrap_err();

    match err {
        Error::ClientApi { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid property");
        }
        other => panic!("expected ClientApi, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_classified_transient() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .send_json(Method::GET, "/flaky", &Params::new())
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_non_object_body_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/array"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .send_json(Method::GET, "/array", &Params::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_empty_body_is_empty_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/instances/delete"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let body = client
        .send_json(Method::POST, "/models/instances/delete", &Params::new())
        .await
        .unwrap();

    assert!(body.is_empty());
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();

    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());

    for _ in 0..3 {
        client
            .send_json(Method::GET, "/api/data", &Params::new())
            .await
            .unwrap();
    }
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new().unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("config"));
}
