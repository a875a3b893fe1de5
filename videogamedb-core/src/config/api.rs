//! Remote API configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    /// Env: VGDB_BASE_URL
    /// Default: "https://videogamedb.uk/api"
    pub base_url: String,

    /// Login user name
    /// Env: VGDB_USERNAME
    /// Default: "admin"
    pub username: String,

    /// Login password
    /// Env: VGDB_PASSWORD
    /// Default: "admin"
    pub password: String,

    /// Per-request timeout in seconds
    /// Env: VGDB_REQUEST_TIMEOUT
    /// Default: 30
    pub request_timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://videogamedb.uk/api".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            request_timeout: 30,
        }
    }
}

impl ApiConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_from<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VGDB_BASE_URL") {
            self.base_url = url;
        }

        if let Some(username) = lookup("VGDB_USERNAME") {
            self.username = username;
        }

        if let Some(password) = lookup("VGDB_PASSWORD") {
            self.password = password;
        }

        if let Some(timeout) = lookup("VGDB_REQUEST_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.request_timeout = t;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            bail!("Invalid base_url '{}': must start with http:// or https://", self.base_url);
        }

        if self.username.is_empty() {
            bail!("Invalid username: cannot be empty");
        }

        if self.request_timeout == 0 {
            bail!("Invalid request_timeout: must be greater than 0");
        }

        Ok(())
    }

    /// Absolute URL for an endpoint path such as `/videogame/1`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
