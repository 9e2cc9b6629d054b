//! Layered configuration for path expansion
//!
//! Configuration is merged with increasing priority from built-in defaults,
//! an optional TOML file and `FILEXPAND_` environment variables. Nested keys
//! use `__` in variable names, e.g. `FILEXPAND_EXPAND__MAX_DEPTH=3`.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ValidationError;
use crate::{ExpandOptions, Result};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "FILEXPAND_";

/// Deepest `max_depth` accepted from configuration
pub const MAX_DEPTH_LIMIT: usize = 4096;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpanderConfig {
    #[serde(default)]
    pub expand: ExpandOptions,
}

impl ExpanderConfig {
    /// Reject settings expansion cannot honour
    pub fn validate(&self) -> Result<()> {
        if let Some(depth) = self.expand.max_depth
            && depth > MAX_DEPTH_LIMIT
        {
            return Err(ValidationError::invalid_configuration(&format!(
                "expand.max_depth {depth} exceeds the limit of {MAX_DEPTH_LIMIT}"
            ))
            .into());
        }
        Ok(())
    }
}

/// Loads [`ExpanderConfig`] from defaults, a config file and the environment
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader reading the platform default config file
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a loader reading a specific config file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("filexpand/config.toml");
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("filexpand")
            .join("config.toml")
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<ExpanderConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ExpanderConfig::default()));

        if self.config_path.exists() {
            log::debug!("Reading configuration from {}", self.config_path.display());
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: ExpanderConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}
