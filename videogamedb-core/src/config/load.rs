//! Load simulation configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Number of virtual users injected
    /// Env: USERS
    /// Default: 5
    pub users: u64,

    /// Seconds over which users are ramped in
    /// Env: RAMP_DURATION
    /// Default: 10
    pub ramp_duration: u64,

    /// Seconds before the first user starts
    /// Env: VGDB_START_DELAY
    /// Default: 5
    pub start_delay: u64,

    /// Seconds paused between two steps of the chain
    /// Env: VGDB_PAUSE
    /// Default: 2
    pub pause: u64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self { users: 5, ramp_duration: 10, start_delay: 5, pause: 2 }
    }
}

impl LoadConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_from<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(users) = lookup("USERS") {
            if let Ok(u) = users.parse() {
                self.users = u;
            }
        }

        if let Some(ramp) = lookup("RAMP_DURATION") {
            if let Ok(r) = ramp.parse() {
                self.ramp_duration = r;
            }
        }

        if let Some(delay) = lookup("VGDB_START_DELAY") {
            if let Ok(d) = delay.parse() {
                self.start_delay = d;
            }
        }

        if let Some(pause) = lookup("VGDB_PAUSE") {
            if let Ok(p) = pause.parse() {
                self.pause = p;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.users == 0 {
            bail!("Invalid users: must be at least 1");
        }
        Ok(())
    }

    pub fn ramp_duration(&self) -> Duration {
        Duration::from_secs(self.ramp_duration)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_secs(self.start_delay)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_secs(self.pause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_users_is_invalid() {
        let cfg = LoadConfig { users: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_ramp_is_allowed() {
        let cfg = LoadConfig { ramp_duration: 0, ..Default::default() };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.ramp_duration(), Duration::ZERO);
    }
}
