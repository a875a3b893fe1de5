//! Static test inputs: sample game records and the new-game body template.

use crate::config::FixturesConfig;
use crate::error::{HarnessError, Result};
use crate::model::GameRecord;
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Read-only fixtures, loaded once per run.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    games: Vec<GameRecord>,
    new_game_template: String,
}

impl FixtureStore {
    /// Load both fixture files, failing on the first unreadable or malformed one.
    pub fn load(config: &FixturesConfig) -> Result<Self> {
        let games = load_games(Path::new(&config.game_data_path))?;
        let new_game_template = load_template(Path::new(&config.new_game_template_path))?;

        log::info!(
            "Loaded {} game records from {} and template {}",
            games.len(),
            config.game_data_path,
            config.new_game_template_path
        );

        Ok(Self { games, new_game_template })
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn new_game_template(&self) -> &str {
        &self.new_game_template
    }

    /// A record chosen uniformly at random.
    pub fn random_game<R: Rng + ?Sized>(&self, rng: &mut R) -> &GameRecord {
        // Non-empty by construction
        self.games.choose(rng).unwrap_or(&self.games[0])
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|source| HarnessError::Io { path: path.to_path_buf(), source })
}

fn load_games(path: &Path) -> Result<Vec<GameRecord>> {
    let content = read(path)?;
    let games: Vec<GameRecord> = serde_json::from_str(&content)
        .map_err(|source| HarnessError::InvalidJson { path: path.to_path_buf(), source })?;
    if games.is_empty() {
        return Err(HarnessError::EmptyFixture(path.to_path_buf()));
    }
    Ok(games)
}

/// The template may hold unquoted placeholders (`"id": #{id}`), so it is
/// checked with every placeholder swapped for `0`.
fn load_template(path: &Path) -> Result<String> {
    let template = read(path)?;
    let probe = crate::body::render_template(&template, |_| Some("0".to_string()))?;
    serde_json::from_str::<serde_json::Value>(&probe)
        .map_err(|source| HarnessError::InvalidJson { path: PathBuf::from(path), source })?;
    Ok(template)
}
