//! Environment variable overrides.
//!
//! `AGENTDESK_*` variables win over file values; CLI flags are applied later
//! by the binary and win over both.

use crate::error::ConfigError;

use super::Config;

pub(super) const ENV_DIRECTORY_URL: &str = "AGENTDESK_DIRECTORY_URL";
pub(super) const ENV_TASK_URL: &str = "AGENTDESK_TASK_URL";
pub(super) const ENV_STREAM_URL: &str = "AGENTDESK_STREAM_URL";
pub(super) const ENV_API_TIMEOUT_SECS: &str = "AGENTDESK_API_TIMEOUT_SECS";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty_env(env_lookup, ENV_DIRECTORY_URL) {
        config.endpoints.directory_url = url;
    }
    if let Some(url) = non_empty_env(env_lookup, ENV_TASK_URL) {
        config.endpoints.task_url = url;
    }
    if let Some(url) = non_empty_env(env_lookup, ENV_STREAM_URL) {
        config.endpoints.stream_url = url;
    }
    if let Some(timeout) = non_empty_env(env_lookup, ENV_API_TIMEOUT_SECS) {
        // Clamp to at least 1 second so `0` never means "no timeout".
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_API_TIMEOUT_SECS} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        config.network.api_timeout_secs = parsed.max(1);
    }
    Ok(())
}

fn non_empty_env<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn env_overrides_endpoints_and_clamps_timeout() {
        let mut config = Config::default();
        let env = lookup(&[
            (ENV_DIRECTORY_URL, "http://dir:9000"),
            (ENV_STREAM_URL, " http://gw:8080 "),
            (ENV_API_TIMEOUT_SECS, "0"),
        ]);
        apply_runtime_env_overrides(&mut config, &env).unwrap();
        assert_eq!(config.endpoints.directory_url, "http://dir:9000");
        assert_eq!(config.endpoints.stream_url, "http://gw:8080");
        assert_eq!(config.network.api_timeout_secs, 1);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = Config::default();
        let env = lookup(&[(ENV_TASK_URL, "   ")]);
        apply_runtime_env_overrides(&mut config, &env).unwrap();
        assert_eq!(config.endpoints.task_url, Config::default().endpoints.task_url);
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let mut config = Config::default();
        let env = lookup(&[(ENV_API_TIMEOUT_SECS, "soon")]);
        let err = apply_runtime_env_overrides(&mut config, &env).unwrap_err();
        assert!(err.to_string().contains("AGENTDESK_API_TIMEOUT_SECS"));
    }
}
