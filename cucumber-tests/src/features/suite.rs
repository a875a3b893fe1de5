//! Run-level set-up shared by every scenario.
//!
//! Fixtures are loaded and the login performed exactly once, before the
//! runner starts. Worlds pick the installed suite up when they are created.

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};
use videogamedb_core::config::HarnessConfig;
use videogamedb_core::{authenticate, AuthenticatedClient, FixtureStore};

static SUITE: OnceLock<Arc<Suite>> = OnceLock::new();

#[derive(Debug)]
pub struct Suite {
    pub fixtures: FixtureStore,
    pub client: AuthenticatedClient,
}

impl Suite {
    /// Load fixtures and authenticate. Any failure here must abort the run.
    pub async fn set_up(config: &HarnessConfig) -> Result<Self> {
        let fixtures = FixtureStore::load(&config.fixtures).context("Failed to load fixtures")?;
        let client = authenticate(&config.api)
            .await
            .with_context(|| format!("Failed to authenticate against {}", config.api.base_url))?;
        Ok(Self { fixtures, client })
    }
}

/// Make `suite` visible to worlds created from now on. The first call wins.
pub fn install(suite: Suite) -> Arc<Suite> {
    Arc::clone(SUITE.get_or_init(|| Arc::new(suite)))
}

pub fn current() -> Option<Arc<Suite>> {
    SUITE.get().cloned()
}
