// Gauntlet - fluent validation for request parameters and typed payloads
//
// This library re-exports the workspace crates behind one dependency: the
// request/response seam and logging from gauntlet-core, configuration from
// gauntlet-config, and the validation engine from gauntlet-validation.

// Re-export core functionality
pub use gauntlet_core::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use gauntlet_config;

#[cfg(feature = "validation")]
pub use gauntlet_validation;

#[cfg(feature = "validation")]
pub use gauntlet_validation::validate;

/// Prelude module for convenient imports
///
/// ```
/// use gauntlet::prelude::*;
///
/// let req = HttpRequest::new("GET", "/items").with_query_param("page", "3");
/// let params = ParamValidator::new(&req);
/// let page = params.query_int("page").range(1, 100).value();
///
/// assert!(params.check().is_ok());
/// assert_eq!(page, 3);
/// ```
pub mod prelude {
    pub use crate::{Error, HttpRequest, HttpResponse};

    #[cfg(feature = "config")]
    pub use gauntlet_config::{ConfigManager, FileFormat};

    #[cfg(feature = "validation")]
    pub use gauntlet_validation::{
        BindError, EntityValidationResult, EntityValidator, FailureKind, Matches, ParamChain,
        ParamValidator, RegistryError, Source, ValidationAggregator, ValidationError,
        ValidationErrors, ValidationPipe, ValidationSettings, Validator, ValidatorRegistry,
        validate,
    };
}
