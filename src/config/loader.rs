//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{DEFAULT_AGENT_NAME, DEFAULT_GREETING};
use super::env::apply_runtime_env_overrides;
use super::init::config_root_dir;
use super::sources::read_config_text_with_sources;
use super::{Config, EndpointsConfig, LoadedConfig};

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from `--config`).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    Ok(load_config_with_source(path_override)?.config)
}

/// Load configuration and report which source supplied it.
pub fn load_config_with_source(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    apply_runtime_env_overrides(&mut config, &env_lookup)?;
    normalize_config(&mut config)?;
    Ok(LoadedConfig { config, source })
}

/// Trim values, fill blanks with defaults, and validate endpoint URLs.
///
/// Public so CLI overrides applied after loading go through the same rules.
pub fn normalize_config(config: &mut Config) -> Result<(), ConfigError> {
    let defaults = EndpointsConfig::default();
    normalize_url(
        &mut config.endpoints.directory_url,
        &defaults.directory_url,
        "endpoints.directory_url",
    )?;
    normalize_url(
        &mut config.endpoints.task_url,
        &defaults.task_url,
        "endpoints.task_url",
    )?;
    normalize_url(
        &mut config.endpoints.stream_url,
        &defaults.stream_url,
        "endpoints.stream_url",
    )?;

    config.network.api_timeout_secs = config.network.api_timeout_secs.max(1);
    config.network.connect_timeout_secs = config.network.connect_timeout_secs.max(1);
    if config.chat.stream_idle_timeout_secs == Some(0) {
        config.chat.stream_idle_timeout_secs = None;
    }

    let agent_name = config.chat.agent_name.trim();
    config.chat.agent_name = if agent_name.is_empty() {
        DEFAULT_AGENT_NAME.to_string()
    } else {
        agent_name.to_string()
    };
    if config.chat.greeting.trim().is_empty() {
        config.chat.greeting = DEFAULT_GREETING.to_string();
    }
    Ok(())
}

fn normalize_url(value: &mut String, default: &str, key: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        *value = default.to_string();
        return Ok(());
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "{key} must be an http(s) URL, got `{trimmed}`"
        )));
    }
    *value = trimmed.to_string();
    Ok(())
}
