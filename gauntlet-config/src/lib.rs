// Configuration management for Gauntlet

pub mod env;
pub mod error;
pub mod loader;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Main configuration manager
///
/// Values from every source are stored as JSON. Values that arrive as
/// strings (environment variables, `.env` files) are re-read as JSON scalars
/// on typed access, so `"422"` can be read as a `u16` and `"true"` as a `bool`.
#[derive(Clone, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    /// Load configuration from environment variables
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        self.extend(loader.load()?);
        Ok(())
    }

    /// Load a `.env` file into the process environment, then load the environment.
    ///
    /// A missing default `.env` file is not an error; a missing explicit path is.
    pub fn load_dotenv(&self, path: Option<&str>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        self.load_env()
    }

    /// Load configuration from a file, detecting the format from its extension
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let loader = ConfigLoader::new(FileFormat::from_path(path)?);
        self.merge_value(loader.load_file(path)?);
        Ok(())
    }

    /// Load configuration from an in-memory document
    pub fn load_str(&self, content: &str, format: FileFormat) -> Result<()> {
        let loader = ConfigLoader::new(format);
        self.merge_value(loader.parse(content)?);
        Ok(())
    }

    fn extend(&self, vars: HashMap<String, String>) {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in vars {
            config.insert(key, Value::String(value));
        }
    }

    fn merge_value(&self, data: Value) {
        if let Value::Object(map) = data {
            let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
            config.extend(map);
        }
    }

    /// Set a configuration value
    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        config.insert(key.to_string(), json_value);

        Ok(())
    }

    /// Get a configuration value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);

        let value = config
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        match serde_json::from_value::<T>(value.clone()) {
            Ok(typed) => Ok(typed),
            Err(first) => match value {
                Value::String(raw) => serde_json::from_str(raw.trim()).map_err(|_| {
                    ConfigError::InvalidValue {
                        key: key.to_string(),
                        reason: first.to_string(),
                    }
                }),
                _ => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: first.to_string(),
                }),
            },
        }
    }

    /// Get a configuration value, falling back to `default` when it is
    /// missing. A present but malformed value is still an error.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        match self.get(key) {
            Err(ConfigError::KeyNotFound(_)) => Ok(default),
            other => other,
        }
    }

    /// Check if a key exists
    pub fn has(&self, key: &str) -> bool {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        config.contains_key(key)
    }

    /// Get all configuration keys
    pub fn keys(&self) -> Vec<String> {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        config.keys().cloned().collect()
    }

    /// Merge configuration from another manager; its values win
    pub fn merge(&self, other: &ConfigManager) {
        if Arc::ptr_eq(&self.config, &other.config) {
            return;
        }
        let other_config = other.config.read().unwrap_or_else(PoisonError::into_inner);
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);

        for (key, value) in other_config.iter() {
            config.insert(key.clone(), value.clone());
        }
    }
}
