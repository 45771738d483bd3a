// Type-keyed validator lookup

use crate::entity::{EntityValidationResult, Validator};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("a validator is already registered for {0}")]
    AlreadyRegistered(&'static str),

    #[error("no validator registered for {0}")]
    Unregistered(&'static str),
}

struct Entry {
    type_name: &'static str,
    // holds an `Arc<dyn Validator<T>>` for the keyed `T`
    validator: Box<dyn Any + Send + Sync>,
}

/// Maps a target type to its validator.
///
/// Built mutably at startup, then shared read-only (usually behind an `Arc`).
/// Each type has at most one validator; registering a second one is an error.
#[derive(Default)]
pub struct ValidatorRegistry {
    entries: HashMap<TypeId, Entry>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `validator` as the validator for `T`
    pub fn register<T, V>(&mut self, validator: V) -> Result<(), RegistryError>
    where
        T: 'static,
        V: Validator<T> + 'static,
    {
        let name = type_name::<T>();
        if self.entries.contains_key(&TypeId::of::<T>()) {
            tracing::warn!(target_type = name, "duplicate validator registration rejected");
            return Err(RegistryError::AlreadyRegistered(name));
        }

        let validator: Arc<dyn Validator<T>> = Arc::new(validator);
        self.entries.insert(
            TypeId::of::<T>(),
            Entry {
                type_name: name,
                validator: Box::new(validator),
            },
        );
        tracing::info!(target_type = name, "validator registered");
        Ok(())
    }

    /// The validator registered for `T`, if any
    pub fn lookup<T: 'static>(&self) -> Option<Arc<dyn Validator<T>>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.validator.downcast_ref::<Arc<dyn Validator<T>>>())
            .cloned()
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Validate `instance` with the validator registered for `T`
    pub fn validate<T: 'static>(&self, instance: &T) -> Result<EntityValidationResult, RegistryError> {
        let validator = self
            .lookup::<T>()
            .ok_or(RegistryError::Unregistered(type_name::<T>()))?;
        Ok(validator.validate(instance))
    }

    /// Names of the registered types
    pub fn registered(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("registered", &self.registered())
            .finish()
    }
}
