//! Fixture file locations

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    /// JSON array of sample game records
    /// Env: VGDB_GAME_DATA
    pub game_data_path: String,

    /// New-game body template with `#{...}` placeholders
    /// Env: VGDB_NEW_GAME_TEMPLATE
    pub new_game_template_path: String,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            game_data_path: "resources/data/gameJsonFile.json".to_string(),
            new_game_template_path: "resources/bodies/newGameTemplate.json".to_string(),
        }
    }
}

impl FixturesConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_from<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("VGDB_GAME_DATA") {
            self.game_data_path = path;
        }
        if let Some(path) = lookup("VGDB_NEW_GAME_TEMPLATE") {
            self.new_game_template_path = path;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.game_data_path.is_empty() || self.new_game_template_path.is_empty() {
            bail!("Fixture paths cannot be empty");
        }
        Ok(())
    }
}
