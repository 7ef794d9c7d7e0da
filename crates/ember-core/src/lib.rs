pub mod app;
pub mod config;
pub mod datastore;
pub mod datetime;
pub mod filter;
pub mod parser;
pub mod priority;
pub mod progress;
pub mod store;
pub mod task;
pub mod voice;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, anyhow};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::app::App;

/// Resolves the data directory and opens the application state. This is
/// the entry point an embedding UI calls once at startup.
#[tracing::instrument(skip_all)]
pub fn open(data_override: Option<&Path>) -> anyhow::Result<App> {
    let data_dir = config::resolve_data_dir(data_override)
        .context("failed to resolve data directory")?;

    let app = App::open(&data_dir)
        .with_context(|| format!("failed to open datastore at {}", data_dir.display()))?;

    info!(data_dir = %data_dir.display(), "ready");
    Ok(app)
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
