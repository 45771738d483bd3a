// Validation errors

use crate::ValidationSettings;
use std::fmt;

/// What went wrong for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A required value was absent or empty
    MissingRequired,
    /// The raw value could not be parsed as the declared type
    Coercion,
    /// The parsed value broke a declared rule
    Constraint,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::MissingRequired => "missing_required",
            FailureKind::Coercion => "coercion",
            FailureKind::Constraint => "constraint",
        }
    }
}

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field name that failed validation
    pub field: String,

    /// Error message
    pub message: String,

    /// Validation constraint that failed
    pub constraint: String,

    pub kind: FailureKind,

    /// Value that failed validation (optional)
    pub value: Option<String>,
}

impl ValidationError {
    /// Create a new constraint violation with a custom message
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            constraint: "custom".to_string(),
            kind: FailureKind::Constraint,
            value: None,
        }
    }

    /// A required value is missing
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            message: format!("{} is required", field),
            field,
            constraint: "required".to_string(),
            kind: FailureKind::MissingRequired,
            value: None,
        }
    }

    /// A raw value could not be parsed as `type_name`
    pub fn coercion(field: impl Into<String>, type_name: &str, raw: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: format!("invalid {} value", type_name),
            constraint: "type".to_string(),
            kind: FailureKind::Coercion,
            value: Some(raw.into()),
        }
    }

    /// Set the constraint name
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    /// Replace the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    fn to_json_with(&self, settings: &ValidationSettings) -> serde_json::Value {
        let mut entry = serde_json::json!({
            "field": self.field,
            "message": self.message,
        });
        if settings.include_constraint {
            entry["constraint"] = serde_json::Value::String(self.constraint.clone());
            entry["kind"] = serde_json::Value::String(self.kind.as_str().to_string());
        }
        if settings.include_value {
            if let Some(value) = &self.value {
                entry["value"] = serde_json::Value::String(value.clone());
            }
        }
        entry
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Every failure collected during one validation pass, in recorded order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Get the error recorded for a field, if any
    pub fn field(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Field names in recorded order
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Convert to the `{"errors": [{"field", "message"}]}` body
    pub fn to_json(&self) -> serde_json::Value {
        self.to_json_with(&ValidationSettings::default())
    }

    /// Convert to JSON, adding constraint codes and values when the settings ask for them
    pub fn to_json_with(&self, settings: &ValidationSettings) -> serde_json::Value {
        serde_json::json!({
            "errors": self
                .errors
                .iter()
                .map(|e| e.to_json_with(settings))
                .collect::<Vec<_>>()
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl ValidationErrors {
    /// Convert to a core error carrying the rendered body and the
    /// configured status
    pub fn to_error(&self, settings: &ValidationSettings) -> gauntlet_core::Error {
        gauntlet_core::Error::Validation {
            message: self.to_string(),
            status: settings.error_status,
            body: self.to_json_with(settings),
        }
    }
}

impl From<ValidationErrors> for gauntlet_core::Error {
    fn from(errors: ValidationErrors) -> Self {
        errors.to_error(&ValidationSettings::default())
    }
}
