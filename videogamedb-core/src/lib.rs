//! # VideoGameDB Core
//!
//! Shared building blocks for the Video Game DB functional suite and load
//! simulation:
//!
//! - **config**: layered configuration (defaults, `videogamedb.toml`, environment)
//! - **logging**: `env_logger` initialisation driven by the configuration
//! - **fixtures**: sample game records and the new-game body template
//! - **body**: request body construction and `#{var}` interpolation
//! - **auth** / **client**: login flow and the bearer-authenticated API client
//!
//! # Example
//!
//! ```no_run
//! use videogamedb_core::{config::HarnessConfig, fixtures::FixtureStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = HarnessConfig::load()?;
//! let fixtures = FixtureStore::load(&config.fixtures)?;
//! let client = videogamedb_core::auth::authenticate(&config.api).await?;
//!
//! let games = client.list_games().await?;
//! assert_eq!(games.status, 200);
//! # let _ = fixtures;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod body;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod model;

pub use auth::{authenticate, extract_token, Credentials};
pub use client::{ApiClient, ApiResponse, AuthenticatedClient};
pub use error::{HarnessError, Result};
pub use fixtures::FixtureStore;
pub use model::GameRecord;

/// Body returned by the API after a successful delete.
pub const DELETE_CONFIRMATION: &str = "Video game deleted";
