// Built-in rule primitives
//
// Both parameter chains and entity validators are built from these, so a rule
// reports the same message whichever front-end declared it.

use crate::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
        .expect("email pattern is a valid regex")
});

/// Number of Unicode code points in `value`
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Values that can be "empty": blank strings, empty collections, `None`
pub trait IsEmpty {
    fn is_empty_value(&self) -> bool;
}

impl IsEmpty for str {
    fn is_empty_value(&self) -> bool {
        self.trim().is_empty()
    }
}

impl IsEmpty for String {
    fn is_empty_value(&self) -> bool {
        self.as_str().is_empty_value()
    }
}

impl<T> IsEmpty for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsEmpty for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

// String validators

/// Validates that a value is not empty; strings must have a non-whitespace character
pub struct NotEmpty;

impl NotEmpty {
    pub fn validate(value: &str, field: &str) -> Result<(), ValidationError> {
        Self::check(value, field)
    }

    pub fn check<V: IsEmpty + ?Sized>(value: &V, field: &str) -> Result<(), ValidationError> {
        if value.is_empty_value() {
            Err(
                ValidationError::new(field, format!("{} should not be empty", field))
                    .with_constraint("notEmpty"),
            )
        } else {
            Ok(())
        }
    }
}

/// Validates minimum string length in code points
pub struct MinLength(pub usize);

impl MinLength {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if char_len(value) < self.0 {
            Err(ValidationError::new(
                field,
                format!("{} must be at least {} characters", field, self.0),
            )
            .with_constraint("minLength")
            .with_value(value))
        } else {
            Ok(())
        }
    }
}

/// Validates maximum string length in code points
pub struct MaxLength(pub usize);

impl MaxLength {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if char_len(value) > self.0 {
            Err(ValidationError::new(
                field,
                format!("{} must be at most {} characters", field, self.0),
            )
            .with_constraint("maxLength")
            .with_value(value))
        } else {
            Ok(())
        }
    }
}

/// Validates string length in code points, inclusive on both ends
pub struct Length {
    pub min: usize,
    pub max: usize,
}

impl Length {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        let len = char_len(value);
        if len >= self.min && len <= self.max {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!(
                    "{} must be between {} and {} characters",
                    field, self.min, self.max
                ),
            )
            .with_constraint("length")
            .with_value(value))
        }
    }
}

/// Validates email shape
pub struct IsEmail;

impl IsEmail {
    pub fn validate(value: &str, field: &str) -> Result<(), ValidationError> {
        if EMAIL_REGEX.is_match(value) {
            Ok(())
        } else {
            Err(
                ValidationError::new(field, format!("{} must be a valid email", field))
                    .with_constraint("isEmail")
                    .with_value(value),
            )
        }
    }
}

/// Full-string regex match
///
/// The pattern is anchored at construction, so `[a-z]+` rejects `"abc1"`.
#[derive(Debug, Clone)]
pub struct Matches {
    regex: Regex,
    pattern: String,
}

impl Matches {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(&format!(r"^(?:{})$", pattern))?,
            pattern: pattern.to_string(),
        })
    }

    /// The pattern as given, without anchors
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if self.is_match(value) {
            Ok(())
        } else {
            Err(
                ValidationError::new(field, format!("{} does not match required pattern", field))
                    .with_constraint("matches")
                    .with_value(value),
            )
        }
    }
}

// Number validators

/// Scalar types the numeric rules apply to
pub trait Numeric: Copy + PartialOrd + fmt::Display {
    const ZERO: Self;
}

macro_rules! impl_numeric {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(impl Numeric for $ty {
            const ZERO: Self = $zero;
        })*
    };
}

impl_numeric!(i32 => 0, i64 => 0, u32 => 0, u64 => 0, f32 => 0.0, f64 => 0.0);

/// Validates value is strictly greater than zero
pub struct IsPositive;

impl IsPositive {
    pub fn validate<T: Numeric>(value: T, field: &str) -> Result<(), ValidationError> {
        if value > T::ZERO {
            Ok(())
        } else {
            Err(
                ValidationError::new(field, format!("{} must be a positive number", field))
                    .with_constraint("isPositive")
                    .with_value(value.to_string()),
            )
        }
    }
}

/// Validates value is zero or greater
pub struct NonNegative;

impl NonNegative {
    pub fn validate<T: Numeric>(value: T, field: &str) -> Result<(), ValidationError> {
        if value >= T::ZERO {
            Ok(())
        } else {
            Err(
                ValidationError::new(field, format!("{} must not be negative", field))
                    .with_constraint("nonNegative")
                    .with_value(value.to_string()),
            )
        }
    }
}

/// Validates value is in range, inclusive on both ends
pub struct InRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Numeric> InRange<T> {
    pub fn validate(&self, value: T, field: &str) -> Result<(), ValidationError> {
        if value >= self.min && value <= self.max {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!("{} must be between {} and {}", field, self.min, self.max),
            )
            .with_constraint("inRange")
            .with_value(value.to_string()))
        }
    }
}

// Set membership

/// Validates value is one of an allowed set. Comparison is exact, so strings
/// are case-sensitive.
pub struct OneOf<'a, A>(pub &'a [A]);

impl<A: fmt::Display> OneOf<'_, A> {
    pub fn validate<T>(&self, value: &T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialEq<A> + fmt::Display,
    {
        if self.0.iter().any(|allowed| value == allowed) {
            Ok(())
        } else {
            let allowed = self
                .0
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Err(
                ValidationError::new(field, format!("{} must be one of: {}", field, allowed))
                    .with_constraint("isIn")
                    .with_value(value.to_string()),
            )
        }
    }
}
