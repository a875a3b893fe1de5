//! Logging configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

const LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace", "off"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set
    /// Env: VGDB_LOG_LEVEL
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_from<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("VGDB_LOG_LEVEL") {
            self.level = level.to_lowercase();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !LEVELS.contains(&self.level.as_str()) {
            bail!("Invalid level '{}': expected one of {}", self.level, LEVELS.join(", "));
        }
        Ok(())
    }
}
