//! Tests for the HTTP module

use super::*;
use crate::config::ClientConfig;
use crate::error::{Error, StatusKind};
use crate::types::Method;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder(format!("{}/api/v4", server.uri()))
        .private_token("glpat-test-token")
        .build()
        .unwrap()
}

// ============================================================================
// RequestOptions Tests
// ============================================================================

#[test]
fn test_request_options_builder() {
    let options = RequestOptions::new()
        .query("state", "opened")
        .per_page(50)
        .page(2)
        .header("X-Request-Id", "abc123")
        .json(json!({"title": "t"}));

    assert_eq!(
        options.query,
        vec![
            ("state".to_string(), "opened".to_string()),
            ("per_page".to_string(), "50".to_string()),
            ("page".to_string(), "2".to_string()),
        ]
    );
    assert_eq!(options.headers.get("X-Request-Id"), Some(&"abc123".to_string()));
    assert_eq!(options.body, Some(json!({"title": "t"})));
}

#[test]
fn test_request_options_without_query() {
    let options = RequestOptions::new()
        .per_page(10)
        .header("X-Trace", "1")
        .without_query();

    assert!(options.query.is_empty());
    assert_eq!(options.headers.get("X-Trace"), Some(&"1".to_string()));
}

#[test]
fn test_decode_body() {
    assert_eq!(decode_body(""), serde_json::Value::Null);
    assert_eq!(decode_body("  \n"), serde_json::Value::Null);
    assert_eq!(decode_body(r#"{"a":1}"#), json!({"a": 1}));
    assert_eq!(decode_body("plain text"), json!("plain text"));
}

// ============================================================================
// Error Message Tests
// ============================================================================

#[test]
fn test_error_message_variants() {
    assert_eq!(
        error_message(r#"{"message": "404 Project Not Found"}"#, Some("Not Found")),
        "404 Project Not Found"
    );
    assert_eq!(
        error_message(r#"{"error": "invalid_token"}"#, None),
        "invalid_token"
    );
    assert_eq!(
        error_message(r#"{"error_description": "Token expired"}"#, None),
        "Token expired"
    );
    assert_eq!(
        error_message(
            r#"{"message": {"labels": ["is invalid", "too long"], "title": ["can't be blank"]}}"#,
            None
        ),
        "'labels' is invalid too long, 'title' can't be blank"
    );
    assert_eq!(error_message("", Some("Bad Gateway")), "Bad Gateway");
    assert_eq!(error_message("<html>oops</html>", None), "<html>oops</html>");
    assert_eq!(error_message(r#"{"other": 1}"#, None), r#"{"other": 1}"#);
}

// ============================================================================
// HttpClient Tests
// ============================================================================

#[test]
fn test_build_url() {
    let config = ClientConfig::new("https://gitlab.example.com/api/v4/");
    let client = HttpClient::new(&config).unwrap();

    assert_eq!(
        client.build_url("/projects").unwrap().as_str(),
        "https://gitlab.example.com/api/v4/projects"
    );
    assert_eq!(
        client.build_url("projects/1/issues").unwrap().as_str(),
        "https://gitlab.example.com/api/v4/projects/1/issues"
    );
    assert_eq!(
        client
            .build_url("https://other.example.com/api/v4/projects?page=2")
            .unwrap()
            .as_str(),
        "https://other.example.com/api/v4/projects?page=2"
    );
}

#[test]
fn test_http_client_rejects_bad_token() {
    let config = ClientConfig {
        private_token: Some("bad\ntoken".to_string()),
        ..ClientConfig::new("https://gitlab.example.com/api/v4")
    };
    let err = HttpClient::new(&config).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "private_token"));
}

#[test]
fn test_http_client_rate_limiter_flag() {
    let config = ClientConfig::builder("https://gitlab.example.com/api/v4")
        .rate_limit(RateLimiterConfig::default())
        .build()
        .unwrap();
    assert!(HttpClient::new(&config).unwrap().has_rate_limiter());
    assert!(!HttpClient::new(&ClientConfig::new("https://gitlab.example.com"))
        .unwrap()
        .has_rate_limiter());
}

#[tokio::test]
async fn test_send_get_with_headers_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(header("PRIVATE-TOKEN", "glpat-test-token"))
        .and(header("Accept", "application/json"))
        .and(query_param("per_page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}, {"id": 2}]))
                .insert_header("X-Total", "7"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&config_for(&mock_server)).unwrap();
    let response = client
        .send(Method::GET, "/projects", &RequestOptions::new().per_page(2))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!([{"id": 1}, {"id": 2}]));
    assert_eq!(
        response.headers.get("x-total").and_then(|v| v.to_str().ok()),
        Some("7")
    );
}

#[tokio::test]
async fn test_send_post_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/1/issues"))
        .and(body_json(json!({"title": "Broken build"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"iid": 12})))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&config_for(&mock_server)).unwrap();
    let response = client
        .send(
            Method::POST,
            "/projects/1/issues",
            &RequestOptions::new().json(json!({"title": "Broken build"})),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body["iid"], 12);
}

#[tokio::test]
async fn test_send_empty_body_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/1/issues/12"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&config_for(&mock_server)).unwrap();
    let response = client
        .send(Method::DELETE, "projects/1/issues/12", &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.status, 204);
    assert!(response.body.is_null());
}

#[tokio::test]
async fn test_send_not_found_is_http_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "404 Project Not Found"})),
        )
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&config_for(&mock_server)).unwrap();
    let err = client
        .send(Method::GET, "/projects/404", &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    match err {
        Error::HttpStatus {
            status,
            method,
            url,
            message,
        } => {
            assert_eq!(status, 404);
            assert_eq!(method, "GET");
            assert!(url.ends_with("/api/v4/projects/404"));
            assert_eq!(message, "404 Project Not Found");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_send_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(&config_for(&mock_server)).unwrap();
    let err = client
        .send(Method::GET, "/flaky", &RequestOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.status_kind(), Some(StatusKind::ServerError));
    assert!(err.to_string().contains("Internal Server Error"));
}

#[tokio::test]
async fn test_send_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder(format!("{}/api/v4", mock_server.uri()))
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();
    let err = client
        .send(Method::GET, "/slow", &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_transport());
}
