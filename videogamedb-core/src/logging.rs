//! Logger initialisation.
//!
//! The harness logs through the standard `log` macros; this module wires the
//! `env_logger` backend once per process. `RUST_LOG` still wins over the
//! configured level so a single run can be made chattier without editing
//! `videogamedb.toml`.

use crate::config::LoggingConfig;

/// Initialise the global logger. Safe to call more than once.
pub fn init_logging(config: &LoggingConfig) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.level.as_str()),
    )
    .format_timestamp_millis()
    .format_module_path(false)
    .try_init();
}
