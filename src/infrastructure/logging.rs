//! Logging initialization
//!
//! Console logging through tracing-subscriber; `RUST_LOG` overrides the
//! default filter.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,squadstats=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
