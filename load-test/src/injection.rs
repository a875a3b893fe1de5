//! User injection: a quiet start delay, then a linear ramp.

use std::time::Duration;
use videogamedb_core::config::LoadConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionProfile {
    pub users: u64,
    pub ramp_duration: Duration,
    pub start_delay: Duration,
}

impl InjectionProfile {
    pub fn from_config(config: &LoadConfig) -> Self {
        Self { users: config.users, ramp_duration: config.ramp_duration(), start_delay: config.start_delay() }
    }

    /// Start offset of user `index`, counted from the beginning of the run.
    pub fn offset(&self, index: u64) -> Duration {
        if self.users == 0 {
            return self.start_delay;
        }
        let ramp_nanos = self.ramp_duration.as_nanos() * u128::from(index) / u128::from(self.users);
        self.start_delay + Duration::from_nanos(ramp_nanos as u64)
    }

    pub fn offsets(&self) -> Vec<Duration> {
        (0..self.users).map(|i| self.offset(i)).collect()
    }
}
