use crate::features::scenario::ScenarioContext;
use crate::features::suite::{self, Suite};
use anyhow::{Context, Result};
use cucumber::World as CucumberWorld;
use std::sync::Arc;

/// Per-scenario world. Only the suite is shared; the scenario context starts empty.
#[derive(Debug, CucumberWorld)]
pub struct VideoGameWorld {
    pub suite: Option<Arc<Suite>>,
    pub scenario: ScenarioContext,
}

impl Default for VideoGameWorld {
    fn default() -> Self {
        Self { suite: suite::current(), scenario: ScenarioContext::default() }
    }
}

impl VideoGameWorld {
    pub fn suite(&self) -> Result<Arc<Suite>> {
        self.suite.clone().context("Suite not set up: fixtures and authentication are missing")
    }
}
