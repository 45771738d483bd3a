//! Fluent validation for request parameters and whole objects
//!
//! Two front-ends share one set of rule primitives and one error shape:
//!
//! - [`ParamValidator`] reads path, query and header parameters, coerces them
//!   to typed values and applies rule chains, collecting at most one failure
//!   per field for the whole request.
//! - [`EntityValidator`] declares per-field rules for a type, and
//!   [`ValidatorRegistry`] maps types to their validators so
//!   [`ValidationPipe`] can decode and validate request bodies.
//!
//! # Examples
//!
//! ## Request Parameters
//!
//! ```
//! use gauntlet_core::HttpRequest;
//! use gauntlet_validation::ParamValidator;
//!
//! let req = HttpRequest::new("GET", "/users/-5").with_path_param("id", "-5");
//!
//! let params = ParamValidator::new(&req);
//! let id = params.path_int("id").positive().value();
//! assert_eq!(id, 0);
//!
//! let errors = params.check().unwrap_err();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.errors[0].field, "id");
//! assert_eq!(errors.errors[0].message, "id must be a positive number");
//! ```
//!
//! ## Entities and the Registry
//!
//! ```
//! use gauntlet_core::HttpRequest;
//! use gauntlet_validation::{EntityValidator, ValidationPipe, ValidatorRegistry};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct CreateUser {
//!     name: String,
//!     email: String,
//! }
//!
//! let mut registry = ValidatorRegistry::new();
//! registry
//!     .register::<CreateUser, _>(
//!         EntityValidator::new()
//!             .field("name", |u: &CreateUser| &u.name, |r| r.not_empty())
//!             .field("email", |u: &CreateUser| &u.email, |r| r.email_address()),
//!     )
//!     .unwrap();
//!
//! let req = HttpRequest::new("POST", "/users")
//!     .with_body(r#"{"name":"Ann","email":"ann@example.com"}"#);
//! let user: CreateUser = ValidationPipe::bind(&registry, &req).unwrap();
//! assert_eq!(user.name, "Ann");
//!
//! let req = HttpRequest::new("POST", "/users").with_body(r#"{"name":"","email":"x"}"#);
//! let failed = ValidationPipe::bind::<CreateUser>(&registry, &req);
//! assert!(failed.is_err());
//! ```
//!
//! ## Rule Primitives
//!
//! ```
//! use gauntlet_validation::{InRange, IsEmail, IsPositive, MinLength};
//!
//! assert!(MinLength(3).validate("john", "username").is_ok());
//! assert!(IsEmail::validate("john@example.com", "email").is_ok());
//! assert!(InRange { min: 1, max: 10 }.validate(5, "score").is_ok());
//! assert!(IsPositive::validate(42, "count").is_ok());
//! ```

mod aggregator;
mod config;
mod entity;
mod errors;
mod params;
mod pipe;
mod registry;
mod source;
mod validators;

pub use aggregator::*;
pub use config::*;
pub use entity::*;
pub use errors::*;
pub use params::*;
pub use pipe::*;
pub use registry::*;
pub use source::*;
pub use validators::*;
