//! Integration tests for gauntlet-core

use gauntlet_core::logging::{LogConfig, LogFormat, LogLevel};
use gauntlet_core::*;
use serde::Deserialize;

#[test]
fn test_http_request_creation() {
    let req = HttpRequest::new("GET", "/test");
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/test");
    assert!(req.headers.is_empty());
    assert!(req.body.is_empty());
}

#[test]
fn test_http_request_parameters() {
    let req = HttpRequest::new("GET", "/users/7")
        .with_path_param("id", "7")
        .with_query_param("sort", "asc")
        .with_header("Content-Type", "application/json");

    assert_eq!(req.param("id").map(String::as_str), Some("7"));
    assert_eq!(req.query("sort").map(String::as_str), Some("asc"));
    assert_eq!(req.header("content-type").map(String::as_str), Some("application/json"));
    assert!(req.param("missing").is_none());
}

#[test]
fn test_http_request_json_body() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Login {
        user: String,
    }

    let req = HttpRequest::new("POST", "/login").with_body(r#"{"user":"ann"}"#);
    let login: Login = req.json().unwrap();
    assert_eq!(login.user, "ann");

    let bad = HttpRequest::new("POST", "/login").with_body("nope");
    let err = bad.json::<Login>().unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_http_response_with_json() {
    use serde_json::json;

    let data = json!({"message": "Hello"});
    let res = HttpResponse::new(200).with_json(&data).unwrap();

    assert_eq!(res.status, 200);
    assert_eq!(
        res.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    let body: serde_json::Value = serde_json::from_slice(&res.body).unwrap();
    assert_eq!(body["message"], "Hello");
}

#[test]
fn test_error_status_codes() {
    let invalid = Error::Validation {
        message: "page: page is required".into(),
        status: 422,
        body: serde_json::json!({"errors": [{"field": "page", "message": "page is required"}]}),
    };

    assert_eq!(Error::BadRequest("x".into()).status_code(), 400);
    assert_eq!(invalid.status_code(), 422);
    assert!(invalid.is_client_error());
    assert!(Error::Configuration("x".into()).is_server_error());
    assert!(Error::Serialization("x".into()).is_server_error());
}

#[test]
fn test_error_into_response() {
    let res = Error::BadRequest("Invalid JSON: eof".into()).into_response();
    assert_eq!(res.status, 400);

    let body: serde_json::Value = serde_json::from_slice(&res.body).unwrap();
    assert_eq!(body, serde_json::json!({"error": "Bad Request: Invalid JSON: eof"}));
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::new()
        .level(LogLevel::Debug)
        .format(LogFormat::Compact)
        .with_targets(false)
        .with_env_filter("gauntlet_validation=trace");

    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.format, LogFormat::Compact);
    assert!(!config.targets);
    assert_eq!(config.env_filter.as_deref(), Some("gauntlet_validation=trace"));
}

#[test]
fn test_logging_init_is_repeatable() {
    let _first = logging::init();
    assert!(!logging::init());
}
