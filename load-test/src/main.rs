//! videogamedb-load - virtual-user load simulation against the Video Game DB
//!
//! ## Usage
//!
//! ```bash
//! # Defaults: 5 users ramped over 10 s after a 5 s delay
//! cargo run --bin videogamedb-load
//!
//! # Heavier run against a local instance
//! USERS=50 RAMP_DURATION=30 cargo run --bin videogamedb-load -- --base-url http://localhost:8080/api
//! ```
//!
//! Exits non-zero when any request was KO.

use anyhow::{bail, Context, Result};
use clap::Parser;
use load_test::Simulation;
use std::path::PathBuf;
use videogamedb_core::config::{HarnessConfig, DEFAULT_CONFIG_FILE};
use videogamedb_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "videogamedb-load")]
#[command(about = "Video Game DB load simulation")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// API base URL, e.g. https://videogamedb.uk/api
    #[arg(long)]
    base_url: Option<String>,

    /// Number of virtual users
    #[arg(short, long, env = "USERS")]
    users: Option<u64>,

    /// Seconds over which users are ramped in
    #[arg(short, long, env = "RAMP_DURATION")]
    ramp_duration: Option<u64>,

    /// Seconds before the first user starts
    #[arg(long)]
    start_delay: Option<u64>,

    /// Seconds paused between requests
    #[arg(short, long)]
    pause: Option<u64>,
}

impl Cli {
    fn apply(self, config: &mut HarnessConfig) {
        if let Some(base_url) = self.base_url {
            config.api.base_url = base_url;
        }
        if let Some(users) = self.users {
            config.load.users = users;
        }
        if let Some(ramp) = self.ramp_duration {
            config.load.ramp_duration = ramp;
        }
        if let Some(delay) = self.start_delay {
            config.load.start_delay = delay;
        }
        if let Some(pause) = self.pause {
            config.load.pause = pause;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = HarnessConfig::load_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    cli.apply(&mut config);
    config.validate()?;

    init_logging(&config.logging);

    let simulation = Simulation::new(&config)?;
    let report = simulation.run().await?;

    if report.has_failures() {
        bail!("{} of {} requests failed", report.total_ko(), report.total_ok() + report.total_ko());
    }
    Ok(())
}
