//! Integration tests for common Gauntlet workflows.
//!
//! These run the end-to-end scenarios through the facade crate: paging
//! parameters, a rejected path id, binding a body, and a missing validator.

#![cfg(feature = "validation")]

use gauntlet::prelude::*;
use serde::Deserialize;

// =============================================================================
// Request Parameters
// =============================================================================

#[test]
fn test_optional_paging_defaults() {
    let req = HttpRequest::new("GET", "/products").with_query_param("size", "10");

    let params = ParamValidator::new(&req);
    let page = params.query_int("page").optional().range(1, 100).value_or(1);
    let size = params.query_int("size").range(1, 50).value_or(10);

    assert_eq!(page, 1);
    assert_eq!(size, 10);
    assert!(params.check().is_ok());
}

#[test]
fn test_negative_path_id() {
    let req = HttpRequest::new("GET", "/products/-5").with_path_param("id", "-5");

    let params = ParamValidator::new(&req);
    let id = params.path_int("id").positive().value();
    assert_eq!(id, 0);

    let errors = params.check().unwrap_err();
    assert_eq!(errors.len(), 1);
    let json = errors.to_json();
    assert_eq!(json["errors"][0]["field"], "id");
    assert_eq!(json["errors"][0]["message"], "id must be a positive number");
}

#[test]
fn test_coercion_short_circuits_rules() {
    let req = HttpRequest::new("GET", "/products/abc").with_path_param("id", "abc");

    let params = ParamValidator::new(&req);
    params.path_int("id").positive().range(1, 10).value();

    let errors = params.check().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors[0].kind, FailureKind::Coercion);
    assert_eq!(errors.errors[0].message, "invalid integer value");
}

#[test]
fn test_required_missing_yields_zero_value() {
    let req = HttpRequest::new("GET", "/search");

    let params = ParamValidator::new(&req);
    let q = params.query_string("q").required().min_length(2).value();
    assert_eq!(q, "");

    let errors = params.check().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors[0].message, "q is required");
    // checking again gives the same answer
    assert_eq!(params.check().unwrap_err(), errors);
}

#[test]
fn test_pattern_with_custom_message() {
    let sku = Matches::new("[A-Z]{3}-[0-9]{4}").unwrap();
    let req = HttpRequest::new("GET", "/").with_query_param("sku", "abc-1234");

    let params = ParamValidator::new(&req);
    params
        .query_string("sku")
        .pattern(&sku, "sku must look like ABC-1234")
        .value();

    let errors = params.check().unwrap_err();
    assert_eq!(errors.errors[0].message, "sku must look like ABC-1234");
}

// =============================================================================
// Entities
// =============================================================================

#[derive(Debug, Deserialize)]
struct Registration {
    name: String,
    email: String,
    password: String,
}

fn registry() -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::new();
    registry
        .register::<Registration, _>(
            EntityValidator::new()
                .field("name", |r: &Registration| &r.name, |rules| rules.not_empty())
                .field("email", |r: &Registration| &r.email, |rules| {
                    rules.not_empty().email_address()
                })
                .field("password", |r: &Registration| &r.password, |rules| {
                    rules
                        .must(|r: &Registration, p: &String| !p.contains(r.name.as_str()))
                        .with_message("password must not contain the username")
                }),
        )
        .unwrap();
    registry
}

#[test]
fn test_entity_errors_in_declaration_order() {
    let result = registry()
        .validate(&Registration {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: "".to_string(),
        })
        .unwrap();

    let fields: Vec<&str> = result.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "email", "password"]);
}

#[test]
fn test_must_sees_whole_object() {
    let result = registry()
        .validate(&Registration {
            name: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "bob1234".to_string(),
        })
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.errors()[0].field, "password");
    assert_eq!(
        result.errors()[0].message,
        "password must not contain the username"
    );
}

#[test]
fn test_bind_and_render() {
    let registry = registry();
    let req = HttpRequest::new("POST", "/register")
        .with_body(r#"{"name":"bob","email":"bob@","password":"hunter22"}"#);

    let errors = match ValidationPipe::bind::<Registration>(&registry, &req) {
        Err(BindError::Invalid(errors)) => errors,
        other => panic!("expected validation failure, got {:?}", other.map(|r| r.name)),
    };

    let response = ValidationPipe::error_response(&errors, &ValidationSettings::default());
    assert_eq!(response.status, 400);
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "errors": [{"field": "email", "message": "email must be a valid email"}]
        })
    );

    let error: Error = BindError::Invalid(errors).into();
    assert_eq!(error.status_code(), 400);
}

#[test]
fn test_unregistered_type_is_a_setup_error() {
    #[derive(Debug, Deserialize)]
    struct Unknown {
        #[allow(dead_code)]
        id: u32,
    }

    let req = HttpRequest::new("POST", "/unknown").with_body(r#"{"id":1}"#);
    let result = ValidationPipe::bind::<Unknown>(&registry(), &req);
    let err = result.unwrap_err();
    assert!(matches!(err, BindError::Unregistered(_)));

    let error: Error = err.into();
    assert_eq!(error.status_code(), 500);
}

#[test]
fn test_settings_from_config() {
    let config = gauntlet::gauntlet_config::ConfigManager::new();
    config.set("validation_error_status", "422").unwrap();
    config.set("validation_include_constraint", true).unwrap();

    let settings = ValidationSettings::from_config(&config).unwrap();
    let errors: ValidationErrors = vec![ValidationError::required("page")].into();
    let response = ValidationPipe::error_response(&errors, &settings);

    assert_eq!(response.status, 422);
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["errors"][0]["constraint"], "required");
    assert_eq!(body["errors"][0]["kind"], "missing_required");
}
