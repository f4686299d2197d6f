//! Logger setup shared by the runner binary and tools
//!
//! Simulation logs live under the `lane_escape` target; dependencies are
//! held at `warn` so `--verbose` shows spawns and tier changes without
//! crate noise.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level)
}

/// Initialize the global logger. `RUST_LOG` wins when set.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    // Only fails if a logger is already installed
    if Builder::from_env(env).format_timestamp_millis().try_init().is_ok() {
        log::debug!("Logger ready ({})", default_filter(verbose));
    }
}
