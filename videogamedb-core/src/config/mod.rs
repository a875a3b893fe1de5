//! Configuration system for the harness
//!
//! Values are resolved in the following order (highest priority wins):
//!
//! 1. **Code / CLI flags** - set on the struct after loading
//! 2. **Environment Variables** - `VGDB_*`, plus `USERS` / `RAMP_DURATION`
//! 3. **Config File** (`videogamedb.toml`) - override defaults
//! 4. **Defaults** - the public Video Game DB with `admin`/`admin`
//!
//! # Example
//!
//! ```no_run
//! use videogamedb_core::config::HarnessConfig;
//!
//! let config = HarnessConfig::load()?;
//! println!("Testing against {}", config.api.base_url);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod fixtures;
pub mod load;
pub mod logging;

pub use api::ApiConfig;
pub use fixtures::FixturesConfig;
pub use load::LoadConfig;
pub use logging::LoggingConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "videogamedb.toml";

/// Complete harness configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub api: ApiConfig,
    pub fixtures: FixturesConfig,
    pub load: LoadConfig,
    pub logging: LoggingConfig,
}

impl HarnessConfig {
    /// Load configuration with the full supersedence chain
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration, reading `path` only if it exists
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.api.merge(other.api);
        self.fixtures.merge(other.fixtures);
        self.load.merge(other.load);
        self.logging.merge(other.logging);
    }

    /// Apply process environment variables
    pub fn apply_env_vars(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply variables resolved through `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api.apply_env_from(&lookup);
        self.fixtures.apply_env_from(&lookup);
        self.load.apply_env_from(&lookup);
        self.logging.apply_env_from(&lookup);
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.api.validate().context("Invalid [api] configuration")?;
        self.fixtures.validate().context("Invalid [fixtures] configuration")?;
        self.load.validate().context("Invalid [load] configuration")?;
        self.logging.validate().context("Invalid [logging] configuration")?;
        Ok(())
    }
}
