// Bind-and-validate for request bodies

use crate::{ValidationErrors, ValidationSettings, ValidatorRegistry};
use gauntlet_core::{Error, HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
use std::any::type_name;

/// Why a body could not be bound
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The body is not valid JSON for the target type
    #[error("invalid JSON: {0}")]
    Decode(String),

    /// No validator is registered for the target type. This is a setup
    /// mistake rather than a bad request.
    #[error("no validator registered for {0}")]
    Unregistered(&'static str),

    #[error("validation failed: {0}")]
    Invalid(ValidationErrors),
}

impl From<BindError> for Error {
    fn from(err: BindError) -> Self {
        match err {
            BindError::Decode(msg) => Error::BadRequest(format!("Invalid JSON: {}", msg)),
            BindError::Invalid(errors) => errors.into(),
            BindError::Unregistered(name) => {
                Error::Configuration(format!("no validator registered for {}", name))
            }
        }
    }
}

/// Decodes request bodies and runs the registered validator on them
pub struct ValidationPipe;

impl ValidationPipe {
    /// Decode the request body as JSON into `T` and validate it
    pub fn bind<T>(registry: &ValidatorRegistry, req: &HttpRequest) -> Result<T, BindError>
    where
        T: DeserializeOwned + 'static,
    {
        let parsed: T = req.json().map_err(|err| {
            tracing::debug!(target_type = type_name::<T>(), error = %err, "body decode failed");
            match err {
                Error::Deserialization(msg) => BindError::Decode(msg),
                other => BindError::Decode(other.to_string()),
            }
        })?;

        Self::validate(registry, &parsed)?;
        Ok(parsed)
    }

    /// Validate an already decoded value
    pub fn validate<T: 'static>(registry: &ValidatorRegistry, value: &T) -> Result<(), BindError> {
        let result = registry.validate(value).map_err(|err| {
            tracing::error!(target_type = type_name::<T>(), "{}", err);
            BindError::Unregistered(type_name::<T>())
        })?;
        result.into_result().map_err(BindError::Invalid)
    }

    /// Render validation errors as a JSON response with the configured status
    pub fn error_response(errors: &ValidationErrors, settings: &ValidationSettings) -> HttpResponse {
        errors.to_error(settings).into_response()
    }
}

/// Validate a value with a registry inside a handler, returning early on failure.
///
/// The failure is a [`BindError`], converted with `?` into the handler's error type.
#[macro_export]
macro_rules! validate {
    ($registry:expr, $value:expr) => {
        $crate::ValidationPipe::validate(&$registry, &$value)?
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityValidator, ValidationError};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct CreateUser {
        name: String,
        age: i32,
    }

    #[derive(Debug, Deserialize)]
    struct Unchecked {
        #[allow(dead_code)]
        note: String,
    }

    fn registry() -> ValidatorRegistry {
        let mut registry = ValidatorRegistry::new();
        registry
            .register::<CreateUser, _>(
                EntityValidator::new()
                    .field("name", |u: &CreateUser| &u.name, |r| r.not_empty())
                    .field("age", |u: &CreateUser| &u.age, |r| {
                        r.must(|_, age: &i32| *age >= 0)
                            .with_message("age must not be negative")
                    }),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_bind_valid_body() {
        let req = HttpRequest::new("POST", "/users").with_body(r#"{"name":"John","age":30}"#);
        let user: CreateUser = ValidationPipe::bind(&registry(), &req).unwrap();
        assert_eq!(user.name, "John");
        assert_eq!(user.age, 30);
    }

    #[test]
    fn test_bind_invalid_json() {
        let req = HttpRequest::new("POST", "/users").with_body("{not json");
        let result = ValidationPipe::bind::<CreateUser>(&registry(), &req);
        assert!(matches!(result, Err(BindError::Decode(_))));

        let err: Error = result.unwrap_err().into();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_bind_collects_failures() {
        let req = HttpRequest::new("POST", "/users").with_body(r#"{"name":"","age":-1}"#);
        let err = ValidationPipe::bind::<CreateUser>(&registry(), &req).unwrap_err();
        match err {
            BindError::Invalid(errors) => {
                assert_eq!(errors.fields(), vec!["name", "age"]);
                assert_eq!(errors.field("age").unwrap().message, "age must not be negative");
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_bind_unregistered_type() {
        let req = HttpRequest::new("POST", "/notes").with_body(r#"{"note":"hi"}"#);
        let result = ValidationPipe::bind::<Unchecked>(&registry(), &req);
        assert!(matches!(result, Err(BindError::Unregistered(_))));
    }

    #[test]
    fn test_core_error_status() {
        let decode: Error = BindError::Decode("eof".to_string()).into();
        assert_eq!(decode.status_code(), 400);

        let invalid: Error =
            BindError::Invalid(vec![ValidationError::required("name")].into()).into();
        assert_eq!(invalid.status_code(), 400);

        let unregistered: Error = BindError::Unregistered("Unchecked").into();
        assert_eq!(unregistered.status_code(), 500);
    }

    #[test]
    fn test_error_response() {
        let errors: ValidationErrors = vec![ValidationError::new("id", "id must be a positive number")
            .with_constraint("isPositive")]
        .into();

        let response = ValidationPipe::error_response(&errors, &ValidationSettings::default());
        assert_eq!(response.status, 400);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["errors"][0]["field"], "id");
        assert!(body["errors"][0].get("constraint").is_none());

        let settings = ValidationSettings {
            error_status: 422,
            include_constraint: true,
            ..ValidationSettings::default()
        };
        let response = ValidationPipe::error_response(&errors, &settings);
        assert_eq!(response.status, 422);
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["errors"][0]["constraint"], "isPositive");
    }

    #[test]
    fn test_validate_macro() {
        fn handler(registry: &ValidatorRegistry, user: CreateUser) -> Result<String, Error> {
            validate!(registry, user);
            Ok(user.name)
        }

        let registry = registry();
        let ok = handler(
            &registry,
            CreateUser {
                name: "Ann".to_string(),
                age: 4,
            },
        );
        assert_eq!(ok.unwrap(), "Ann");

        let err = handler(
            &registry,
            CreateUser {
                name: String::new(),
                age: 4,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { status: 400, .. }));

        let response = err.into_response();
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"errors": [{"field": "name", "message": "name should not be empty"}]})
        );
    }
}
