//! Config loading with CLI overrides, and logging setup.

use crate::cli::Args;
use agentdesk::config::{load_config_with_source, normalize_config, LoadedConfig};
use agentdesk::error::AppError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub(crate) const LOG_ENV: &str = "AGENTDESK_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the stderr `tracing` subscriber. Filter comes from `AGENTDESK_LOG`.
pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load config from files and environment, then layer CLI flags on top.
pub(crate) fn load_runtime_config(args: &Args) -> Result<LoadedConfig, AppError> {
    let mut loaded = load_config_with_source(args.config.as_deref())?;
    apply_cli_overrides(&mut loaded, args)?;
    debug!(source = %loaded.source.describe(), "config loaded");
    Ok(loaded)
}

fn apply_cli_overrides(loaded: &mut LoadedConfig, args: &Args) -> Result<(), AppError> {
    let endpoints = &mut loaded.config.endpoints;
    if let Some(url) = &args.directory_url {
        endpoints.directory_url = url.clone();
    }
    if let Some(url) = &args.task_url {
        endpoints.task_url = url.clone();
    }
    if let Some(url) = &args.stream_url {
        endpoints.stream_url = url.clone();
    }
    if args.no_color {
        loaded.config.display.color = false;
    }
    normalize_config(&mut loaded.config)?;
    Ok(())
}
