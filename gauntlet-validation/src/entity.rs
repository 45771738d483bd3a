//! Declarative validators for whole objects.
//!
//! An [`EntityValidator`] is a list of fields, each with an accessor into the
//! object and an ordered list of rules. Validation walks the fields in
//! declaration order and stops at the first failing rule of each field, so a
//! result holds at most one error per field.
//!
//! ```
//! use gauntlet_validation::EntityValidator;
//!
//! struct Signup {
//!     name: String,
//!     password: String,
//! }
//!
//! let validator = EntityValidator::<Signup>::new()
//!     .field("name", |s| &s.name, |r| r.not_empty())
//!     .field("password", |s| &s.password, |r| {
//!         r.min_length(8)
//!             .must(|s, password: &String| !password.contains(s.name.as_str()))
//!             .with_message("password must not contain the name")
//!     });
//!
//! let result = validator.validate(&Signup {
//!     name: "bob".into(),
//!     password: "bob12345".into(),
//! });
//! assert_eq!(result.len(), 1);
//! assert_eq!(result.errors()[0].message, "password must not contain the name");
//! ```

use crate::validators::{IsEmail, IsEmpty, Length, Matches, MaxLength, MinLength, NotEmpty};
use crate::{ValidationError, ValidationErrors};
use std::any::type_name;
use std::fmt;

/// A validator for values of type `T`.
///
/// Implemented by [`EntityValidator`]; hand-written validators implement it
/// directly and register the same way.
pub trait Validator<T>: Send + Sync {
    fn validate(&self, instance: &T) -> EntityValidationResult;
}

/// Outcome of validating one object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityValidationResult {
    errors: Vec<ValidationError>,
}

impl EntityValidationResult {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn valid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// The failure recorded for `field`, if any
    pub fn field(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn into_errors(self) -> ValidationErrors {
        ValidationErrors::new(self.errors)
    }

    /// `Ok(())` when valid, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.into_errors())
        }
    }
}

struct Rule<T, V: ?Sized> {
    check: Box<dyn Fn(&T, &V, &str) -> Result<(), ValidationError> + Send + Sync>,
    message: Option<String>,
}

/// The ordered rules for one field, built inside [`EntityValidator::field`].
///
/// `T` is the validated object and `V` the field type the accessor returns.
pub struct FieldRules<T, V: ?Sized> {
    field: String,
    rules: Vec<Rule<T, V>>,
}

impl<T: 'static, V: ?Sized + 'static> FieldRules<T, V> {
    fn new(field: String) -> Self {
        Self {
            field,
            rules: Vec::new(),
        }
    }

    fn rule<F>(mut self, check: F) -> Self
    where
        F: Fn(&T, &V, &str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            check: Box::new(check),
            message: None,
        });
        self
    }

    /// Custom predicate over the whole object and the field value.
    ///
    /// Fails with "{field} is invalid" unless a message is attached.
    pub fn must<F>(self, predicate: F) -> Self
    where
        F: Fn(&T, &V) -> bool + Send + Sync + 'static,
    {
        self.rule(move |instance, value, field| {
            if predicate(instance, value) {
                Ok(())
            } else {
                Err(ValidationError::new(field, format!("{} is invalid", field))
                    .with_constraint("must"))
            }
        })
    }

    /// Replace the message of the most recently added rule
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if let Some(rule) = self.rules.last_mut() {
            rule.message = Some(message.into());
        }
        self
    }

    fn evaluate(&self, instance: &T, value: &V) -> Option<ValidationError> {
        self.rules.iter().find_map(|rule| {
            (rule.check)(instance, value, &self.field)
                .err()
                .map(|error| match &rule.message {
                    Some(message) => error.with_message(message.clone()),
                    None => error,
                })
        })
    }
}

impl<T: 'static, V: IsEmpty + ?Sized + 'static> FieldRules<T, V> {
    /// Blank strings, empty collections and `None` fail
    pub fn not_empty(self) -> Self {
        self.rule(|_, value, field| NotEmpty::check(value, field))
    }
}

impl<T: 'static, V: AsRef<str> + ?Sized + 'static> FieldRules<T, V> {
    /// Length in code points, inclusive on both ends
    pub fn length(self, min: usize, max: usize) -> Self {
        self.rule(move |_, value, field| Length { min, max }.validate(value.as_ref(), field))
    }

    pub fn min_length(self, min: usize) -> Self {
        self.rule(move |_, value, field| MinLength(min).validate(value.as_ref(), field))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.rule(move |_, value, field| MaxLength(max).validate(value.as_ref(), field))
    }

    pub fn matches(self, pattern: Matches) -> Self {
        self.rule(move |_, value, field| pattern.validate(value.as_ref(), field))
    }

    pub fn email_address(self) -> Self {
        self.rule(|_, value, field| IsEmail::validate(value.as_ref(), field))
    }
}

struct FieldValidator<T> {
    field: String,
    validate: Box<dyn Fn(&T) -> Option<ValidationError> + Send + Sync>,
}

/// Rule-based validator for `T`, built once and reused
pub struct EntityValidator<T> {
    fields: Vec<FieldValidator<T>>,
}

impl<T: 'static> EntityValidator<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field. `accessor` projects the field out of `T`; `build`
    /// declares its rules in the order they are checked.
    pub fn field<V, A, B>(mut self, name: impl Into<String>, accessor: A, build: B) -> Self
    where
        V: ?Sized + 'static,
        A: Fn(&T) -> &V + Send + Sync + 'static,
        B: FnOnce(FieldRules<T, V>) -> FieldRules<T, V>,
    {
        let name = name.into();
        let rules = build(FieldRules::new(name.clone()));
        self.fields.push(FieldValidator {
            field: name,
            validate: Box::new(move |instance| rules.evaluate(instance, accessor(instance))),
        });
        self
    }

    /// Field names in declaration order
    pub fn fields(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn validate(&self, instance: &T) -> EntityValidationResult {
        let mut errors: Vec<ValidationError> = Vec::new();
        for field in &self.fields {
            // a name declared twice keeps its first failure
            if errors.iter().any(|e| e.field == field.field) {
                continue;
            }
            if let Some(error) = (field.validate)(instance) {
                errors.push(error);
            }
        }

        tracing::debug!(
            entity = type_name::<T>(),
            failures = errors.len(),
            "entity validated"
        );
        EntityValidationResult::new(errors)
    }
}

impl<T: 'static> Default for EntityValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for EntityValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityValidator")
            .field("entity", &type_name::<T>())
            .field("fields", &self.fields())
            .finish()
    }
}

impl<T: 'static> Validator<T> for EntityValidator<T> {
    fn validate(&self, instance: &T) -> EntityValidationResult {
        EntityValidator::validate(self, instance)
    }
}
