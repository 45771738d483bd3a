// Request-scoped failure collection

use crate::{ValidationError, ValidationErrors};
use std::cell::RefCell;

/// Collects parameter failures for one request.
///
/// Holds at most one failure per field: the first one recorded wins and
/// later failures for the same field are dropped. Parameter chains share the
/// aggregator by reference and record into it as they run, so it uses
/// interior mutability and is not `Sync`; each request owns
/// its own.
#[derive(Debug, Default)]
pub struct ValidationAggregator {
    failures: RefCell<Vec<ValidationError>>,
}

impl ValidationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a constraint failure for `field` with a custom message.
    ///
    /// Returns `false` if the field already had a failure.
    pub fn record(&self, field: impl Into<String>, message: impl Into<String>) -> bool {
        self.record_error(ValidationError::new(field, message))
    }

    /// Record a prepared error, subject to the first-wins policy
    pub fn record_error(&self, error: ValidationError) -> bool {
        let mut failures = self.failures.borrow_mut();
        if failures.iter().any(|existing| existing.field == error.field) {
            tracing::trace!(
                field = %error.field,
                constraint = %error.constraint,
                "field already failed, dropping later failure"
            );
            return false;
        }

        tracing::debug!(
            field = %error.field,
            constraint = %error.constraint,
            kind = error.kind.as_str(),
            "validation failure recorded"
        );
        failures.push(error);
        true
    }

    /// Whether a failure has been recorded for `field`
    pub fn has_failure(&self, field: &str) -> bool {
        self.failures.borrow().iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.failures.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.borrow().len()
    }

    /// Snapshot of the failures recorded so far, in order
    pub fn failures(&self) -> Vec<ValidationError> {
        self.failures.borrow().clone()
    }

    /// `Ok(())` when nothing failed, otherwise every failure in one error.
    ///
    /// Does not clear anything, so repeated calls give the same answer.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let failures = self.failures.borrow();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(failures.clone()))
        }
    }

    /// Consume the aggregator, returning what it collected
    pub fn into_errors(self) -> ValidationErrors {
        ValidationErrors::new(self.failures.into_inner())
    }
}
