use anyhow::{Context, Result};
use cucumber::World;
use cucumber_tests::features::{suite, suite::Suite, VideoGameWorld};
use videogamedb_core::config::HarnessConfig;
use videogamedb_core::logging::init_logging;

mod steps;

#[tokio::main]
async fn main() -> Result<()> {
    let config = HarnessConfig::load()?;
    init_logging(&config.logging);

    // Set-up failures abort before any scenario runs
    let suite = Suite::set_up(&config).await.context("Suite set-up failed")?;
    suite::install(suite);

    VideoGameWorld::cucumber()
        .max_concurrent_scenarios(1)
        .run_and_exit(concat!(env!("CARGO_MANIFEST_DIR"), "/features"))
        .await;

    Ok(())
}
