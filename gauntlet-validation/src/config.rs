// Validation settings

use gauntlet_config::{ConfigManager, Result};

/// Environment prefix for [`ValidationSettings::from_env`]
pub const ENV_PREFIX: &str = "GAUNTLET";

/// Settings read once at startup and copied into each request's validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSettings {
    /// Status used when rendering an aggregate failure
    pub error_status: u16,
    /// Include the constraint code and failure kind in rendered errors
    pub include_constraint: bool,
    /// Include the offending value in rendered errors
    pub include_value: bool,
    /// Trim surrounding whitespace from raw parameters before checking them
    pub trim_whitespace: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            error_status: 400,
            include_constraint: false,
            include_value: false,
            trim_whitespace: true,
        }
    }
}

impl ValidationSettings {
    /// Read settings from a configuration manager.
    ///
    /// Keys: `validation_error_status`, `validation_include_constraint`,
    /// `validation_include_value`, `validation_trim_whitespace`. Missing keys
    /// keep their defaults; malformed ones are errors.
    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        let defaults = Self::default();
        let settings = Self {
            error_status: config.get_or("validation_error_status", defaults.error_status)?,
            include_constraint: config
                .get_or("validation_include_constraint", defaults.include_constraint)?,
            include_value: config.get_or("validation_include_value", defaults.include_value)?,
            trim_whitespace: config
                .get_or("validation_trim_whitespace", defaults.trim_whitespace)?,
        };

        if !(400..500).contains(&settings.error_status) {
            return Err(gauntlet_config::ConfigError::InvalidValue {
                key: "validation_error_status".to_string(),
                reason: format!("{} is not a 4xx status", settings.error_status),
            });
        }

        tracing::debug!(?settings, "validation settings loaded");
        Ok(settings)
    }

    /// Read settings from `GAUNTLET_*` variables, after loading `.env` if present
    pub fn from_env() -> Result<Self> {
        let config = ConfigManager::with_prefix(ENV_PREFIX);
        config.load_dotenv(None)?;
        Self::from_config(&config)
    }
}
